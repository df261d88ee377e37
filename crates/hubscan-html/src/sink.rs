//! Destinations for extracted articles.

use std::convert::Infallible;
use std::io::{self, Write};

use crate::extractor::Article;

/// Column names, in output order.
pub const CSV_COLUMNS: [&str; 5] = ["title", "url", "date", "author", "tags"];

/// Receives each article as soon as it is complete.
pub trait Sink {
    /// Error raised when an article cannot be written.
    type Error;

    /// Accept one complete article.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if the article could not be stored.
    fn write(&mut self, article: &Article) -> Result<(), Self::Error>;
}

impl Sink for Vec<Article> {
    type Error = Infallible;

    fn write(&mut self, article: &Article) -> Result<(), Infallible> {
        self.push(article.clone());
        Ok(())
    }
}

/// Writes `title,url,date,author,tags` rows.
///
/// The header is written once, before the first row (or eagerly with
/// [`write_header`](Self::write_header)). Every field is double-quoted and
/// embedded quotes are doubled.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer. Nothing is written yet.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    /// Write the header row unless it was already written.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn write_header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.out, "{}", CSV_COLUMNS.join(","))?;
        self.header_written = true;
        Ok(())
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwrap the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_field(&mut self, field: &str) -> io::Result<()> {
        self.out.write_all(b"\"")?;
        let mut rest = field;
        while let Some(quote) = rest.find('"') {
            self.out.write_all(rest[..=quote].as_bytes())?;
            self.out.write_all(b"\"")?;
            rest = &rest[quote + 1..];
        }
        self.out.write_all(rest.as_bytes())?;
        self.out.write_all(b"\"")
    }
}

impl<W: Write> Sink for CsvSink<W> {
    type Error = io::Error;

    fn write(&mut self, article: &Article) -> io::Result<()> {
        self.write_header()?;
        let tags = article.tags_joined();
        let fields = [
            article.title.as_str(),
            article.url.as_str(),
            article.date.as_str(),
            article.author.as_str(),
            tags.as_str(),
        ];
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.out.write_all(b",")?;
            }
            self.write_field(field)?;
        }
        self.out.write_all(b"\n")
    }
}

/// Writes one JSON object per line with the same five fields as the CSV.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwrap the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    type Error = io::Error;

    fn write(&mut self, article: &Article) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, article)?;
        self.out.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article {
            title: "Say \"hi\", world".to_string(),
            url: "https://habr.com/p/1".to_string(),
            date: "2024-01-02".to_string(),
            author: String::new(),
            tags: vec!["C++".to_string(), "Go".to_string()],
        }
    }

    fn csv_text(articles: &[Article]) -> String {
        let mut sink = CsvSink::new(Vec::new());
        for article in articles {
            sink.write(article).unwrap();
        }
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn csv_header_then_quoted_row() {
        assert_eq!(
            csv_text(&[sample()]),
            "title,url,date,author,tags\n\
             \"Say \"\"hi\"\", world\",\"https://habr.com/p/1\",\"2024-01-02\",\"\",\"C++;Go\"\n"
        );
    }

    #[test]
    fn csv_header_written_once() {
        let text = csv_text(&[sample(), sample()]);
        assert_eq!(text.matches("title,url,date,author,tags").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn csv_eager_header_without_rows() {
        let mut sink = CsvSink::new(Vec::new());
        sink.write_header().unwrap();
        sink.write_header().unwrap();
        assert_eq!(sink.into_inner(), b"title,url,date,author,tags\n");
    }

    #[test]
    fn json_lines_flatten_tags() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write(&sample()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["tags"], "C++;Go");
        assert_eq!(value["title"], "Say \"hi\", world");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<Article> = Vec::new();
        let Ok(()) = sink.write(&sample());
        assert_eq!(sink.len(), 1);
    }
}
