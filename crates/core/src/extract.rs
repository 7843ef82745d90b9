// ABOUTME: Item extraction: pairs each entry element on the page with its parsed view count.
// ABOUTME: Skips entries without a metadata line and isolates per-entry failures from the batch.

use dom_query::{Document, Matcher, NodeRef, Selection};
use tracing::{debug, warn};

use crate::error::{ItemError, SortError};
use crate::locale::is_view_count_text;
use crate::metric::parse_metric;
use crate::options::SortOptions;
use crate::selectors::require;

/// One sortable entry: a handle to its element plus the count read from it.
///
/// `metric` is 0 when the count is unknown. `source_text` is the label the
/// count was read from, or the configured placeholder.
#[derive(Debug, Clone)]
pub struct Item<H> {
    pub handle: H,
    pub metric: u64,
    pub source_text: String,
}

impl<H> Item<H> {
    pub fn new(handle: H, metric: u64, source_text: impl Into<String>) -> Self {
        Self {
            handle,
            metric,
            source_text: source_text.into(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.metric == 0
    }
}

/// Extracts every entry under `doc` in document order. Read-only.
///
/// An entry nested inside an entry that was already extracted is left out;
/// it moves with its enclosing entry. Fails only when a configured selector
/// does not compile.
pub fn extract_items<'a>(
    doc: &'a Document,
    opts: &SortOptions,
) -> Result<Vec<Item<NodeRef<'a>>>, SortError> {
    let item_matcher = require(&opts.item_selector)?;
    let metadata_matcher = require(&opts.metadata_selector)?;
    let text_matcher = require(&opts.text_selector)?;

    let candidates = doc.select_matcher(&item_matcher);
    debug!(count = candidates.nodes().len(), "found candidate items");

    let mut items = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(node) = candidate.nodes().first() {
            if has_item_ancestor(node, &items) {
                debug!(index, "skipping item nested inside another item");
                continue;
            }
        }
        match extract_one(&candidate, &metadata_matcher, &text_matcher, opts) {
            Ok(Some(item)) => {
                debug!(index, text = %item.source_text, views = item.metric, "extracted item");
                items.push(item);
            }
            Ok(None) => debug!(index, "skipping candidate without metadata line"),
            Err(err) => warn!(index, error = %err, "skipping malformed item"),
        }
    }

    debug!(count = items.len(), "extracted items");
    Ok(items)
}

fn extract_one<'a>(
    candidate: &Selection<'a>,
    metadata_matcher: &Matcher,
    text_matcher: &Matcher,
    opts: &SortOptions,
) -> Result<Option<Item<NodeRef<'a>>>, ItemError> {
    let handle = match candidate.nodes().first() {
        Some(node) => node.clone(),
        None => return Ok(None),
    };

    // Only the first metadata line carries the count.
    let metadata = candidate.select_matcher(metadata_matcher).first();
    if !metadata.exists() {
        return Ok(None);
    }

    let fields = metadata.select_matcher(text_matcher);
    let first = fields.nodes().first().ok_or(ItemError::MissingTextField)?;
    let text = first.text().to_string();
    let text = text.trim();

    if is_view_count_text(text) {
        Ok(Some(Item::new(handle, parse_metric(text), text)))
    } else {
        Ok(Some(Item::new(handle, 0, opts.unknown_placeholder.as_str())))
    }
}

/// True when one of `items` is a proper ancestor of `node`.
pub(crate) fn has_item_ancestor(node: &NodeRef, items: &[Item<NodeRef>]) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if items.iter().any(|item| item.handle.id == ancestor.id) {
            return true;
        }
        current = ancestor.parent();
    }
    false
}
