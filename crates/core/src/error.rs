// ABOUTME: Error types for view-count sorting.
// ABOUTME: Provides SortError for whole-operation failures, ItemError for skipped entries, ReadinessError for polling.

use thiserror::Error;

/// Errors that abort a sort before the container is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// Extraction found no items to sort.
    #[error("no items found to sort")]
    NoItemsFound,

    /// The parent holding the items could not be located.
    #[error("could not determine the container holding the items")]
    ContainerUndeterminable,

    /// A configured structural selector failed to compile.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

impl SortError {
    /// Creates an InvalidSelector error for the given CSS text.
    pub fn invalid_selector(css: impl Into<String>) -> Self {
        SortError::InvalidSelector(css.into())
    }

    /// Returns true if the failure should be shown to the person who asked for the sort.
    ///
    /// Only an empty page is; a missing container is logged and dropped.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SortError::NoItemsFound)
    }
}

/// Structural anomalies in a single candidate item. The candidate is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The metadata line holds no text field to classify.
    #[error("metadata line has no text field")]
    MissingTextField,
}

/// Errors from waiting on a late-arriving page region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    /// The readiness check never succeeded within the attempt budget.
    #[error("gave up after {attempts} attempts")]
    GaveUp { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(SortError::NoItemsFound.to_string(), "no items found to sort");
        assert_eq!(
            SortError::invalid_selector("[[").to_string(),
            "invalid selector: [["
        );
        assert_eq!(
            ReadinessError::GaveUp { attempts: 20 }.to_string(),
            "gave up after 20 attempts"
        );
    }

    #[test]
    fn test_only_empty_page_is_user_facing() {
        assert!(SortError::NoItemsFound.is_user_facing());
        assert!(!SortError::ContainerUndeterminable.is_user_facing());
        assert!(!SortError::invalid_selector("x").is_user_facing());
    }
}
