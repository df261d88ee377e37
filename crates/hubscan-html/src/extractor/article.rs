//! The record assembled for each article card.

use serde::{Serialize, Serializer};

/// Separator between tags in the flattened tag list.
pub const TAG_SEPARATOR: &str = ";";

/// One article card from a search-result page.
///
/// Only articles with a non-empty `title` and `url` ever leave the extractor;
/// `date`, `author` and `tags` may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Normalized title text.
    pub title: String,
    /// Absolute URL of the article, or the link as written if it was neither
    /// absolute nor origin-relative.
    pub url: String,
    /// `YYYY-MM-DD` taken from the card's `datetime` attribute.
    pub date: String,
    /// Normalized author name.
    pub author: String,
    /// Hub names in encounter order; duplicates are kept.
    #[serde(serialize_with = "serialize_joined")]
    pub tags: Vec<String>,
}

impl Article {
    /// Tags joined with [`TAG_SEPARATOR`], the form written to CSV.
    #[must_use]
    pub fn tags_joined(&self) -> String {
        self.tags.join(TAG_SEPARATOR)
    }
}

fn serialize_joined<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&tags.join(TAG_SEPARATOR))
}
