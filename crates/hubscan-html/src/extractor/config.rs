//! Extractor configuration: where card links point and which classes mark
//! the regions of a card.

use hubscan_common::url::PLATFORM_ORIGIN;

/// Bytes kept of a card's raw title text.
pub const TITLE_CAPACITY: usize = 1024;
/// Bytes kept of a card's raw author text.
pub const AUTHOR_CAPACITY: usize = 256;
/// Bytes kept of the raw text of one tag link.
pub const TAG_TEXT_CAPACITY: usize = 512;

/// Marker classes and limits for [`Extractor`](super::Extractor).
///
/// Class markers are matched as substrings of the `class` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Origin prepended to origin-relative links.
    pub origin: String,
    /// Class on the `<article>` element of a card.
    pub article_class: String,
    /// Class on the `<a>` carrying the title and link.
    pub title_link_class: String,
    /// Class on the `<a>` carrying the author name.
    pub author_link_class: String,
    /// Class on the `<div>` that contains the hub links.
    pub hubs_container_class: String,
    /// Class on each hub `<a>` inside the container.
    pub hub_link_class: String,
    /// Stop after this many articles. `None` extracts everything.
    pub limit: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            origin: PLATFORM_ORIGIN.to_string(),
            article_class: "tm-articles-list__item".to_string(),
            title_link_class: "tm-title__link".to_string(),
            author_link_class: "tm-user-info__username".to_string(),
            hubs_container_class: "tm-publication-hubs".to_string(),
            hub_link_class: "tm-publication-hub__link".to_string(),
            limit: None,
        }
    }
}

impl ExtractorConfig {
    /// The default markers with an emission limit.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}
