//! Common utilities for hubscan.
//!
//! This crate provides shared infrastructure used by the extractor and the CLI:
//! - **Warning System** - deduplicated warnings routed through `tracing`
//! - **URL helpers** - origin resolution for card links, search URL construction
//! - **Networking** - blocking page fetch with retry and backoff

pub mod net;
pub mod url;
pub mod warning;

pub use net::{FetchConfig, FetchError, HttpFetcher, PageFetcher, RetryPolicy};
