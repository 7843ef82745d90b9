// ABOUTME: Compiled CSS selector cache for structural markers.
// ABOUTME: Compiles each selector once per process and reports invalid ones as SortError.

//! Selector caching for repeated structural queries.
//!
//! Every sort walks every item with the same handful of selectors. Compiling
//! them once and sharing the `Matcher` keeps the per-item cost to matching.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dom_query::Matcher;
use once_cell::sync::Lazy;

use crate::error::SortError;

/// Compiled matchers keyed by selector text. Text that fails to compile is
/// stored as `None` so a bad selector is parsed only once.
static MATCHERS: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Looks `css` up in the process-wide cache, compiling it on first use.
///
/// `None` means the selector text does not parse.
pub fn get_or_compile(css: &str) -> Option<Matcher> {
    if let Some(hit) = MATCHERS.read().unwrap_or_else(PoisonError::into_inner).get(css) {
        return hit.clone();
    }

    MATCHERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(css.to_string())
        .or_insert_with(|| Matcher::new(css).ok())
        .clone()
}

/// Like `get_or_compile`, but an invalid selector becomes `SortError::InvalidSelector`.
pub fn require(css: &str) -> Result<Matcher, SortError> {
    get_or_compile(css).ok_or_else(|| SortError::invalid_selector(css))
}
