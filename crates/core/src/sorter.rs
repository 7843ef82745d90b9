// ABOUTME: The Sorter entry point: extract items, rank them by view count, rewrite their container.
// ABOUTME: Also owns the re-entrancy latch and the notification policy applied when a sort is triggered.

use std::cell::Cell;

use dom_query::{Document, NodeRef};
use tracing::{debug, error, info};

use crate::error::SortError;
use crate::extract::{extract_items, has_item_ancestor, Item};
use crate::notify::Notifier;
use crate::options::{SortOptions, SorterBuilder};
use crate::reorder::{rank_items, rewrite_children, SortReport, REPORT_TOP_N};

/// Single boolean latch guarding against a sort starting while one runs.
#[derive(Debug, Default)]
pub struct SortLatch {
    held: Cell<bool>,
}

impl SortLatch {
    /// Takes the latch, or returns None if it is already held.
    pub fn try_acquire(&self) -> Option<SortGuard<'_>> {
        if self.held.replace(true) {
            None
        } else {
            Some(SortGuard { latch: self })
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }
}

/// Releases the latch on drop.
#[derive(Debug)]
pub struct SortGuard<'a> {
    latch: &'a SortLatch,
}

impl Drop for SortGuard<'_> {
    fn drop(&mut self) {
        self.latch.held.set(false);
    }
}

/// What happened when a sort was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Sorted(SortReport),
    /// Another sort held the latch; nothing was done.
    Busy,
    Failed(SortError),
}

/// Sorts the entries of a channel listing page by view count.
#[derive(Debug, Default)]
pub struct Sorter {
    opts: SortOptions,
    latch: SortLatch,
}

impl Sorter {
    pub fn new(opts: SortOptions) -> Self {
        Self {
            opts,
            latch: SortLatch::default(),
        }
    }

    pub fn builder() -> SorterBuilder {
        SorterBuilder::new()
    }

    pub fn options(&self) -> &SortOptions {
        &self.opts
    }

    pub fn latch(&self) -> &SortLatch {
        &self.latch
    }

    /// Reads every entry and its view count without touching the document.
    pub fn extract_items<'a>(
        &self,
        doc: &'a Document,
    ) -> Result<Vec<Item<NodeRef<'a>>>, SortError> {
        extract_items(doc, &self.opts)
    }

    /// Reorders the entries in place: known counts descending, unknown counts
    /// last in document order, everything else after the entries.
    ///
    /// On error the document is left untouched.
    pub fn sort_by_metric(&self, doc: &Document) -> Result<SortReport, SortError> {
        info!("starting sort");

        let mut items = self.extract_items(doc)?;
        if items.is_empty() {
            info!("no items found");
            return Err(SortError::NoItemsFound);
        }

        rank_items(&mut items);
        for (rank, item) in items.iter().take(REPORT_TOP_N).enumerate() {
            debug!(rank = rank + 1, views = item.metric, "top item after sorting");
        }

        let container = match items[0].handle.parent() {
            Some(container) => container,
            None => {
                error!("could not find the container holding the items");
                return Err(SortError::ContainerUndeterminable);
            }
        };
        if items.iter().any(|item| item.handle.id == container.id)
            || has_item_ancestor(&container, &items)
        {
            error!("container lies inside a sorted item");
            return Err(SortError::ContainerUndeterminable);
        }
        debug!(
            container = ?container.node_name().map(|n| n.to_string()),
            "rewriting container"
        );

        let others = rewrite_children(&container, &items);
        let report = SortReport::from_ranked(&items, others);
        info!(
            sorted = report.sorted,
            unknown = report.unknown,
            others = report.others,
            "items re-sorted"
        );
        Ok(report)
    }

    /// Runs a sort on behalf of the page's sort control.
    ///
    /// Never fails: the outcome is reported through `notifier` (success or an
    /// empty page) or the log (anything else).
    pub fn trigger(&self, doc: &Document, notifier: &dyn Notifier) -> TriggerOutcome {
        let _guard = match self.latch.try_acquire() {
            Some(guard) => guard,
            None => {
                debug!("sort already in progress");
                return TriggerOutcome::Busy;
            }
        };

        match self.sort_by_metric(doc) {
            Ok(report) => {
                notifier.notify(&self.opts.success_message(report.sorted));
                TriggerOutcome::Sorted(report)
            }
            Err(err) => {
                if err.is_user_facing() {
                    notifier.notify(&self.opts.no_items_message);
                } else {
                    error!(error = %err, "sort aborted");
                }
                TriggerOutcome::Failed(err)
            }
        }
    }
}
