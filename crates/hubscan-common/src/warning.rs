//! Deduplicated warnings.
//!
//! Provides deduplication to avoid spamming the same warning for every page or
//! article. Used by the extractor and the CLI to report recoverable oddities in
//! the input that never turn into errors.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning once per unique `component`/`message` pair.
///
/// # Example
/// ```ignore
/// warn_once("Extractor", "article card without a title link was discarded");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        tracing::warn!(component, "{message}");
    }
}

/// Records the pair and reports whether it had not been seen before.
fn first_sighting(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Clear all recorded warnings (call when starting a new run)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
