// ABOUTME: Page-level plumbing: channel page detection and the sort button in the filter chip bar.
// ABOUTME: Button injection reports "not ready" until the chip bar exists so callers can poll for it.

use dom_query::{Document, NodeRef};
use tracing::debug;

/// Path fragments that identify a channel page.
const CHANNEL_PATH_MARKERS: &[&str] = &["/@", "/channel/", "/c/", "/user/"];

pub const SORT_BUTTON_ID: &str = "sort-by-views-btn";
pub const SORT_BUTTON_LABEL: &str = "Sort by Views";
const CHIP_BAR_SELECTOR: &str = "#chips";
const RIGHT_ARROW_ID: &str = "right-arrow";

/// Returns true if `path` belongs to a channel page.
pub fn is_channel_page(path: &str) -> bool {
    CHANNEL_PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

/// Places the sort button next to the filter chips.
///
/// Returns false, leaving the document untouched, while the chip bar is
/// missing. Any button left by a previous page is replaced. The button goes
/// into the chip bar's grandparent just before the right scroll arrow, or at
/// its end when there is no arrow.
pub fn inject_sort_button(doc: &Document) -> bool {
    let chips = doc.select(CHIP_BAR_SELECTOR);
    let chip_bar = match chips.nodes().first() {
        Some(node) => node.clone(),
        None => {
            debug!("chip bar not found");
            return false;
        }
    };

    remove_sort_button(doc);

    let scroll_container = chip_bar.parent();
    let host = match scroll_container.as_ref().and_then(|n| n.parent()) {
        Some(grandparent) => grandparent,
        None => scroll_container.unwrap_or_else(|| chip_bar.clone()),
    };

    let button = doc.tree.new_element("button");
    button.set_attr("id", SORT_BUTTON_ID);
    button.set_attr("type", "button");
    button.set_text(SORT_BUTTON_LABEL);

    match find_by_id(&host, RIGHT_ARROW_ID) {
        Some(arrow) => arrow.insert_before(&button),
        None => host.append_child(&button),
    }

    debug!("sort button created");
    true
}

/// Removes the sort button if present. Returns true if one was removed.
pub fn remove_sort_button(doc: &Document) -> bool {
    let existing = doc.select(&format!("#{}", SORT_BUTTON_ID));
    let nodes = existing.nodes();
    for node in nodes {
        node.remove_from_parent();
    }
    if !nodes.is_empty() {
        debug!("removed existing sort button");
    }
    !nodes.is_empty()
}

/// Depth-first search for a descendant of `root` with the given id attribute.
fn find_by_id<'a>(root: &NodeRef<'a>, id: &str) -> Option<NodeRef<'a>> {
    for child in root.children() {
        if child.attr("id").map_or(false, |value| &*value == id) {
            return Some(child);
        }
        if let Some(found) = find_by_id(&child, id) {
            return Some(found);
        }
    }
    None
}
