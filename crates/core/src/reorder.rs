// ABOUTME: List reconciliation: ranks items by view count and rebuilds their container's child list.
// ABOUTME: Non-item children keep their relative order and move after the items; no node is created or dropped.

use std::cmp::Ordering;

use dom_query::NodeRef;
use serde::Serialize;

use crate::extract::Item;

/// How many leading entries a report keeps for diagnostics.
pub const REPORT_TOP_N: usize = 5;

/// Orders two counts: known counts descending, unknown (0) after every known count.
///
/// Two unknowns compare equal, so a stable sort keeps their document order.
pub fn compare_metrics(a: u64, b: u64) -> Ordering {
    match (a, b) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        _ => b.cmp(&a),
    }
}

/// Sorts items in place by `compare_metrics`. Stable.
pub fn rank_items<H>(items: &mut [Item<H>]) {
    items.sort_by(|a, b| compare_metrics(a.metric, b.metric));
}

/// Computes a container's new child order: `ranked` first, then every child
/// not among them in its original relative order.
///
/// Membership is decided by `key`, so handles are compared by identity
/// rather than by content.
pub fn plan_child_order<T, K, F>(children: &[T], ranked: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let item_keys: Vec<K> = ranked.iter().map(&key).collect();
    let others = children
        .iter()
        .filter(|child| !item_keys.contains(&key(*child)))
        .cloned();

    ranked.iter().cloned().chain(others).collect()
}

/// Detaches every child of `container` and re-appends them in the order
/// given by `plan_child_order`. Returns the number of non-item children.
///
/// Items that lived elsewhere are moved into `container`.
pub fn rewrite_children(container: &NodeRef, ranked: &[Item<NodeRef>]) -> usize {
    let children = container.children();
    let handles: Vec<NodeRef> = ranked.iter().map(|item| item.handle.clone()).collect();
    let plan = plan_child_order(&children, &handles, |node| node.id);

    for child in &children {
        child.remove_from_parent();
    }
    for node in &plan {
        node.remove_from_parent();
        container.append_child(node);
    }

    plan.len() - handles.len()
}

/// Summary of a completed sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortReport {
    /// Items placed in the container.
    pub sorted: usize,
    /// Items with an unknown count, placed last among the items.
    pub unknown: usize,
    /// Non-item children moved after the items.
    pub others: usize,
    /// Leading entries after the sort.
    pub top: Vec<RankedEntry>,
}

/// One leading entry of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub views: u64,
    pub text: String,
}

impl SortReport {
    pub fn from_ranked<H>(ranked: &[Item<H>], others: usize) -> Self {
        Self {
            sorted: ranked.len(),
            unknown: ranked.iter().filter(|item| item.is_unknown()).count(),
            others,
            top: ranked
                .iter()
                .take(REPORT_TOP_N)
                .map(|item| RankedEntry {
                    views: item.metric,
                    text: item.source_text.clone(),
                })
                .collect(),
        }
    }
}
