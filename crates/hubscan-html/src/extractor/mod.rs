//! Article extraction state machine.
//!
//! The extractor consumes the token sequence of a search-result page and
//! assembles one [`Article`] per article card. Outside a card it is idle; a
//! start tag `article` carrying the card marker class opens a card, and the
//! matching end tag closes it. Inside a card four regions are tracked
//! independently, each with its own [`Region`] depth counter:
//!
//! - the title link (`a`), whose `href` becomes the article URL
//! - the author link (`a`)
//! - the hub container (`div`), which only counts nested `div`s
//! - a tag link (`a`), which can only open inside the hub container
//!
//! Text is buffered raw while a region is open and normalized once when the
//! region closes. A card is emitted only if it ends with a non-empty title
//! and URL; otherwise it is discarded without a trace in the output.

/// The article record.
pub mod article;
/// Marker classes, origin and limit.
pub mod config;
/// Depth-counted region tracker.
pub mod region;

pub use article::{Article, TAG_SEPARATOR};
pub use config::{AUTHOR_CAPACITY, ExtractorConfig, TAG_TEXT_CAPACITY, TITLE_CAPACITY};
pub use region::Region;

use hubscan_common::url::resolve_against_origin;
use hubscan_common::warning::warn_once;

use crate::attributes::{class_list_contains, read_attribute};
use crate::bounded::BoundedBuffer;
use crate::sink::Sink;
use crate::text::normalize_field;
use crate::tokenizer::{Token, Tokenizer};

/// Length of the `YYYY-MM-DD` prefix of a `datetime` value.
const DATE_LEN: usize = 10;

/// Everything that belongs to the card being assembled. Dropped as a whole
/// when the card closes.
#[derive(Debug)]
struct Card {
    depth: Region,
    article: Article,
    title: Region,
    author: Region,
    hubs: Region,
    tag_link: Region,
    title_text: BoundedBuffer,
    author_text: BoundedBuffer,
    tag_text: BoundedBuffer,
}

impl Card {
    fn open() -> Self {
        let mut depth = Region::default();
        depth.open();
        Self {
            depth,
            article: Article::default(),
            title: Region::default(),
            author: Region::default(),
            hubs: Region::default(),
            tag_link: Region::default(),
            title_text: BoundedBuffer::new(TITLE_CAPACITY),
            author_text: BoundedBuffer::new(AUTHOR_CAPACITY),
            tag_text: BoundedBuffer::new(TAG_TEXT_CAPACITY),
        }
    }

    /// Normalize the pending tag text and append it as a tag if non-empty.
    fn finish_tag(&mut self) {
        let tag = normalize_field(&self.tag_text.to_string_lossy());
        if !tag.is_empty() {
            self.article.tags.push(tag);
        }
        self.tag_text.clear();
    }
}

/// Streaming extractor for article cards.
///
/// Feed it tokens with [`process`](Self::process) or whole documents with
/// [`consume_html`](Self::consume_html). The emitted count and the done flag
/// survive across documents, so one extractor can walk every page of a
/// search.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    card: Option<Card>,
    emitted: usize,
    done: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl Extractor {
    /// Create an idle extractor. A limit of zero means nothing will ever be
    /// emitted.
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        let done = config.limit == Some(0);
        Self {
            config,
            card: None,
            emitted: 0,
            done,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Number of articles emitted so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }

    /// Whether the limit was reached. Once set, every token is ignored.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Whether a card is currently open.
    #[must_use]
    pub const fn is_in_article(&self) -> bool {
        self.card.is_some()
    }

    /// Process one token. Returns the article completed by this token, if
    /// any.
    pub fn process(&mut self, token: &Token) -> Option<Article> {
        if self.done {
            return None;
        }
        match token {
            Token::StartTag {
                name, attributes, ..
            } => {
                self.handle_start_tag(name, attributes);
                None
            }
            Token::EndTag { name } => self.handle_end_tag(name),
            Token::Text { content } => {
                self.handle_text(content);
                None
            }
        }
    }

    /// Tokenize a complete document and write every article it completes to
    /// `sink`. Stops early once the limit is reached.
    ///
    /// A card still open when the document ends is abandoned. Returns the
    /// number of articles emitted from this document.
    ///
    /// # Errors
    ///
    /// Returns the sink's error as soon as a write fails; articles already
    /// written stay written.
    pub fn consume_html<S: Sink>(&mut self, html: &[u8], sink: &mut S) -> Result<usize, S::Error> {
        let mut tokenizer = Tokenizer::new();
        let mut count = 0;
        for token in tokenizer.feed(html, true) {
            if let Some(article) = self.process(&token) {
                sink.write(&article)?;
                count += 1;
            }
            if self.done {
                break;
            }
        }
        if self.card.take().is_some() {
            tracing::trace!("document ended inside an article card; abandoned");
        }
        Ok(count)
    }

    fn handle_start_tag(&mut self, name: &str, attributes: &str) {
        if self.card.is_none() {
            if name == "article" && class_list_contains(attributes, &self.config.article_class) {
                self.card = Some(Card::open());
            }
            return;
        }
        let config = &self.config;
        let Some(card) = self.card.as_mut() else {
            return;
        };

        if name == "article" {
            card.depth.nest();
            return;
        }

        let title_was_active = card.title.is_active();
        let author_was_active = card.author.is_active();
        let tag_was_active = card.tag_link.is_active();

        match name {
            "div" => {
                if card.hubs.is_active() {
                    card.hubs.nest();
                } else if class_list_contains(attributes, &config.hubs_container_class) {
                    card.hubs.open();
                }
            }
            "a" => {
                if !title_was_active && class_list_contains(attributes, &config.title_link_class) {
                    card.title.open();
                    if let Some(href) = read_attribute(attributes, "href") {
                        card.article.url = resolve_against_origin(href, &config.origin);
                    }
                }
                if !author_was_active && class_list_contains(attributes, &config.author_link_class)
                {
                    card.author.open();
                }
                if !tag_was_active
                    && card.hubs.is_active()
                    && class_list_contains(attributes, &config.hub_link_class)
                {
                    card.tag_link.open();
                    card.tag_text.clear();
                }
            }
            "time" => {
                if let Some(date) = read_attribute(attributes, "datetime")
                    .and_then(|datetime| datetime.get(..DATE_LEN))
                {
                    card.article.date = date.to_string();
                }
            }
            _ => {}
        }

        // Every start tag inside an open region deepens it, so its end tag
        // pairs with the right close.
        if title_was_active {
            card.title.nest();
        }
        if author_was_active {
            card.author.nest();
        }
        if tag_was_active {
            card.tag_link.nest();
        }
    }

    fn handle_end_tag(&mut self, name: &str) -> Option<Article> {
        let card = self.card.as_mut()?;

        if name == "article" {
            if card.depth.close() {
                return self.finish_card();
            }
            return None;
        }

        if card.title.close() {
            card.article.title = normalize_field(&card.title_text.to_string_lossy());
        }
        if card.author.close() {
            card.article.author = normalize_field(&card.author_text.to_string_lossy());
        }
        if card.tag_link.close() {
            card.finish_tag();
        }
        if name == "div" {
            let _ = card.hubs.close();
        }
        None
    }

    fn handle_text(&mut self, content: &str) {
        let Some(card) = self.card.as_mut() else {
            return;
        };
        if card.title.is_active() {
            card.title_text.push_str(content);
        }
        if card.author.is_active() {
            card.author_text.push_str(content);
        }
        if card.tag_link.is_active() {
            card.tag_text.push_str(content);
        }
    }

    /// Close the open card and emit it if it has a title and a URL.
    fn finish_card(&mut self) -> Option<Article> {
        let card = self.card.take()?;
        let mut article = card.article;
        article.title = normalize_field(&card.title_text.to_string_lossy());
        article.author = normalize_field(&card.author_text.to_string_lossy());

        if article.title.is_empty() || article.url.is_empty() {
            warn_once("extractor", "skipped an article card without a title or link");
            return None;
        }

        self.emitted += 1;
        if self.config.limit.is_some_and(|limit| self.emitted >= limit) {
            self.done = true;
        }
        tracing::debug!(
            title = %article.title,
            url = %article.url,
            tags = article.tags.len(),
            "article extracted"
        );
        Some(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attributes: &str) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes: attributes.to_string(),
            self_closing: false,
        }
    }

    fn end(name: &str) -> Token {
        Token::EndTag {
            name: name.to_string(),
        }
    }

    fn text(content: &str) -> Token {
        Token::Text {
            content: content.to_string(),
        }
    }

    #[test]
    fn unbalanced_end_tags_are_ignored() {
        let mut extractor = Extractor::default();
        for token in [end("a"), end("div"), end("article")] {
            assert_eq!(extractor.process(&token), None);
        }
        assert!(!extractor.is_in_article());
    }

    #[test]
    fn title_survives_nested_markup() {
        let mut extractor = Extractor::default();
        let tokens = [
            start("article", r#"class="tm-articles-list__item""#),
            start("a", r#"class="tm-title__link" href="/p/1""#),
            start("span", ""),
            text("Hello"),
            end("span"),
            text(" world"),
            end("a"),
            text("outside"),
            end("article"),
        ];
        let articles: Vec<Article> = tokens
            .iter()
            .filter_map(|token| extractor.process(token))
            .collect();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Hello world");
        assert_eq!(articles[0].url, "https://habr.com/p/1");
    }

    #[test]
    fn tag_link_needs_hub_container() {
        let mut extractor = Extractor::default();
        let tokens = [
            start("article", r#"class="tm-articles-list__item""#),
            start("a", r#"class="tm-title__link" href="/p/1""#),
            text("T"),
            end("a"),
            start("a", r#"class="tm-publication-hub__link""#),
            text("Stray"),
            end("a"),
            end("article"),
        ];
        let article = tokens
            .iter()
            .find_map(|token| extractor.process(token))
            .unwrap();
        assert!(article.tags.is_empty());
    }

    #[test]
    fn zero_limit_is_done_from_the_start() {
        let extractor = Extractor::new(ExtractorConfig::with_limit(0));
        assert!(extractor.is_done());
    }
}
