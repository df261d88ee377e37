//! URL helpers.
//!
//! Card links on search pages are either absolute or origin-relative; the
//! search endpoint takes a percent-encoded query. Nothing here needs a full
//! URL parser.

/// Origin of the blogging platform. Origin-relative links resolve against it.
pub const PLATFORM_ORIGIN: &str = "https://habr.com";

/// Resolve a card link against the platform origin.
///
/// # Algorithm
///
/// STEP 1: An `http://` or `https://` link is already absolute; keep it verbatim.
///
/// STEP 2: A link starting with `/` is origin-relative; prepend `origin`.
///
/// STEP 3: Anything else (`p/123`, `?page=2`, `mailto:`) is kept verbatim and
/// unresolved.
#[must_use]
pub fn resolve_against_origin(href: &str, origin: &str) -> String {
    // STEP 1
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    // STEP 2
    if href.starts_with('/') {
        return format!("{origin}{href}");
    }

    // STEP 3
    href.to_string()
}

/// Percent-encode a search query.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` becomes `%XX`, spaces included.
#[must_use]
pub fn encode_query(query: &str) -> String {
    urlencoding::encode(query).into_owned()
}

/// Build the URL of one page of search results.
///
/// `lang` is the path segment of the localized site (`en`, `ru`); pages are
/// numbered from 1.
#[must_use]
pub fn search_page_url(origin: &str, lang: &str, query: &str, page: u32) -> String {
    let encoded = encode_query(query);
    format!("{origin}/{lang}/search/?q={encoded}&target_type=posts&order=relevance&page={page}")
}
