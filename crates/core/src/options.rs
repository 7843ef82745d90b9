// ABOUTME: Configuration for the sorter: structural selectors, notification messages, polling and navigation timing.
// ABOUTME: SorterBuilder provides a fluent API for constructing Sorter instances with custom settings.

use std::time::Duration;

use crate::sorter::Sorter;

/// Marker of one video entry in the channel grid.
pub const DEFAULT_ITEM_SELECTOR: &str = "ytd-rich-item-renderer";
/// Marker of the metadata line inside an entry.
pub const DEFAULT_METADATA_SELECTOR: &str = "#metadata-line";
/// Marker of the text fields inside the metadata line.
pub const DEFAULT_TEXT_SELECTOR: &str = "span";

/// Configuration options for the sorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    pub item_selector: String,
    pub metadata_selector: String,
    pub text_selector: String,
    /// Diagnostic text recorded for entries without a readable count.
    pub unknown_placeholder: String,
    /// Shown when no entries were found.
    pub no_items_message: String,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            metadata_selector: DEFAULT_METADATA_SELECTOR.to_string(),
            text_selector: DEFAULT_TEXT_SELECTOR.to_string(),
            unknown_placeholder: "(no views - member-only or hidden)".to_string(),
            no_items_message:
                "No videos found to sort. Make sure you're on a channel's videos page.".to_string(),
        }
    }
}

impl SortOptions {
    /// Message shown after a successful sort of `count` entries.
    pub fn success_message(&self, count: usize) -> String {
        format!("Sorted {} videos by view count!", count)
    }
}

/// Bounded retry settings for waiting on a late-arriving page region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessOptions {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ReadinessOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_attempts: 20,
        }
    }
}

/// Delay before re-initialising after an in-page navigation.
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(500);

/// Builder for constructing Sorter instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct SorterBuilder {
    opts: SortOptions,
}

impl SorterBuilder {
    /// Create a new SorterBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: SortOptions::default(),
        }
    }

    /// Set the selector that marks an entry.
    pub fn item_selector(mut self, css: impl Into<String>) -> Self {
        self.opts.item_selector = css.into();
        self
    }

    /// Set the selector for the metadata line inside an entry.
    pub fn metadata_selector(mut self, css: impl Into<String>) -> Self {
        self.opts.metadata_selector = css.into();
        self
    }

    /// Set the selector for text fields inside the metadata line.
    pub fn text_selector(mut self, css: impl Into<String>) -> Self {
        self.opts.text_selector = css.into();
        self
    }

    /// Set the diagnostic placeholder for entries without a count.
    pub fn unknown_placeholder(mut self, text: impl Into<String>) -> Self {
        self.opts.unknown_placeholder = text.into();
        self
    }

    /// Set the notice shown when no entries were found.
    pub fn no_items_message(mut self, text: impl Into<String>) -> Self {
        self.opts.no_items_message = text.into();
        self
    }

    /// Build the Sorter with the configured options.
    pub fn build(self) -> Sorter {
        Sorter::new(self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_channel_grid_markup() {
        let opts = SortOptions::default();
        assert_eq!(opts.item_selector, "ytd-rich-item-renderer");
        assert_eq!(opts.metadata_selector, "#metadata-line");
        assert_eq!(opts.text_selector, "span");
    }

    #[test]
    fn test_success_message() {
        let opts = SortOptions::default();
        assert_eq!(opts.success_message(3), "Sorted 3 videos by view count!");
    }

    #[test]
    fn test_builder_overrides() {
        let sorter = SorterBuilder::new()
            .item_selector("li.video")
            .metadata_selector(".meta")
            .text_selector("em")
            .build();
        assert_eq!(sorter.options().item_selector, "li.video");
        assert_eq!(sorter.options().metadata_selector, ".meta");
        assert_eq!(sorter.options().text_selector, "em");
    }

    #[test]
    fn test_readiness_defaults() {
        let opts = ReadinessOptions::default();
        assert_eq!(opts.interval, Duration::from_millis(500));
        assert_eq!(opts.max_attempts, 20);
    }
}
