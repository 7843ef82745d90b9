// ABOUTME: Locale keyword detection for metadata-line text fields.
// ABOUTME: Tells view-count labels apart from upload dates and durations sharing the same slot.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

/// Stems of the view-count unit label in English, French, Spanish and German.
pub const VIEW_KEYWORDS: &[&str] = &["view", "vue", "visualizacion", "aufruf"];

static VIEW_KEYWORD_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(VIEW_KEYWORDS)
        .unwrap()
});

/// Returns true if `text` carries a view-count unit label.
///
/// Member-only and scheduled entries put their upload date or premiere
/// notice where the view count normally sits, so only text with a unit
/// label is treated as a count.
pub fn is_view_count_text(text: &str) -> bool {
    VIEW_KEYWORD_MATCHER.is_match(text)
}
