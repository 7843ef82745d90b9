// ABOUTME: Main library entry point for sorting channel listing videos by view count.
// ABOUTME: Re-exports the public API: Sorter, SorterBuilder, parse_metric, Item, SortReport, SortError and the page plumbing.

//! viewsort - reorders the videos of a channel listing page by view count.
//!
//! The page is a parsed `dom_query::Document`. Each entry's view-count label
//! is read from its metadata line, parsed into a number, and the entries are
//! re-inserted into their container, most viewed first. Entries without a
//! readable count go last; other children of the container (section
//! separators and the like) go after all entries.
//!
//! # Example
//!
//! ```no_run
//! use dom_query::Document;
//! use viewsort_core::{Sorter, SortError};
//!
//! fn main() -> Result<(), SortError> {
//!     let html = std::fs::read_to_string("channel.html").unwrap();
//!     let doc = Document::from(html.as_str());
//!     let report = Sorter::default().sort_by_metric(&doc)?;
//!     println!("sorted {} videos", report.sorted);
//!     println!("{}", doc.html());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod locale;
pub mod metric;
pub mod navigation;
pub mod notify;
pub mod options;
pub mod page;
pub mod readiness;
pub mod reorder;
pub mod selectors;
pub mod sorter;

pub use dom_query;

pub use crate::error::{ItemError, ReadinessError, SortError};
pub use crate::extract::{extract_items, Item};
pub use crate::locale::is_view_count_text;
pub use crate::metric::parse_metric;
pub use crate::navigation::{AttachOutcome, NavigationWatcher, Session};
pub use crate::notify::{LogNotifier, Notifier};
pub use crate::options::{ReadinessOptions, SortOptions, SorterBuilder};
pub use crate::page::{inject_sort_button, is_channel_page, remove_sort_button};
pub use crate::readiness::wait_until;
pub use crate::reorder::{compare_metrics, plan_child_order, rank_items, RankedEntry, SortReport};
pub use crate::sorter::{SortLatch, Sorter, TriggerOutcome};
