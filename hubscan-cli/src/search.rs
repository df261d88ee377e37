//! Live mode: walk the result pages of one query.
//!
//! Pages are fetched one at a time, each fed whole to the extractor before
//! the next request. The walk ends when the article limit is reached, when a
//! page adds no new article (taken to mean the results ran out), or when a
//! fetch fails for good.

use std::time::Duration;

use hubscan_common::url::search_page_url;
use hubscan_common::{FetchError, PageFetcher};
use hubscan_html::{Extractor, Sink};
use strum_macros::Display;

/// What to search for and how fast.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Platform origin, e.g. `https://habr.com`.
    pub origin: String,
    /// Language path segment.
    pub lang: String,
    /// Raw query text; encoded when the URL is built.
    pub query: String,
    /// Pause between consecutive page requests.
    pub delay: Duration,
}

/// Why the walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StopReason {
    /// The extractor reached its article limit.
    #[strum(serialize = "limit reached")]
    LimitReached,
    /// A page produced no new article.
    #[strum(serialize = "no more results")]
    Exhausted,
    /// A page could not be fetched.
    #[strum(serialize = "fetch failed")]
    FetchFailed,
}

/// Result of a completed walk.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Pages requested, including a failed last one.
    pub pages: u32,
    /// Why the walk ended.
    pub reason: StopReason,
    /// The terminal fetch error, for [`StopReason::FetchFailed`].
    pub error: Option<FetchError>,
}

/// Fetch result pages from 1 upward and feed them to `extractor`.
///
/// `sleep` is called with the configured delay before every request except
/// the first.
///
/// # Errors
///
/// Only sink errors are returned. A failed fetch ends the walk normally with
/// [`StopReason::FetchFailed`].
pub fn run_search<F, S>(
    config: &SearchConfig,
    extractor: &mut Extractor,
    fetcher: &mut F,
    sink: &mut S,
    mut sleep: impl FnMut(Duration),
) -> Result<SearchOutcome, S::Error>
where
    F: PageFetcher,
    S: Sink,
{
    let mut page: u32 = 0;
    let stop = |pages, reason, error| SearchOutcome {
        pages,
        reason,
        error,
    };

    loop {
        if extractor.is_done() {
            return Ok(stop(page, StopReason::LimitReached, None));
        }
        if page > 0 {
            sleep(config.delay);
        }
        page += 1;

        let url = search_page_url(&config.origin, &config.lang, &config.query, page);
        let body = match fetcher.fetch(&url) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(page, error = %err, "giving up on page");
                return Ok(stop(page, StopReason::FetchFailed, Some(err)));
            }
        };

        let added = extractor.consume_html(&body, sink)?;
        tracing::info!(page, added, total = extractor.emitted(), "page processed");

        if added == 0 && !extractor.is_done() {
            return Ok(stop(page, StopReason::Exhausted, None));
        }
    }
}
