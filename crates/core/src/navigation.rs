// ABOUTME: In-page navigation handling for single-page hosts.
// ABOUTME: NavigationWatcher detects location changes; Session re-attaches the sort button after each one.

use std::time::Duration;

use dom_query::Document;
use tokio::time::sleep;
use tracing::{debug, info};
use url::Url;

use crate::options::{ReadinessOptions, DEFAULT_NAVIGATION_DELAY};
use crate::page::{inject_sort_button, is_channel_page, remove_sort_button};
use crate::readiness::wait_until;

/// Remembers the last seen location so repeated change notifications for
/// the same page are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationWatcher {
    last: Option<String>,
}

impl NavigationWatcher {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            last: Some(initial.into()),
        }
    }

    /// Records `location` and returns true if it differs from the last one seen.
    pub fn check_and_update(&mut self, location: &str) -> bool {
        if self.last.as_deref() == Some(location) {
            return false;
        }
        self.last = Some(location.to_string());
        true
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Result of trying to put the sort button on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    NotChannelPage,
    Attached { attempts: u32 },
    /// The chip bar never appeared.
    GaveUp,
}

/// Path component of a location; the location itself if it is not an absolute URL.
pub fn location_path(location: &str) -> String {
    Url::parse(location)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| location.to_string())
}

/// Keeps the sort button attached across in-page navigations.
#[derive(Debug, Clone)]
pub struct Session {
    watcher: NavigationWatcher,
    readiness: ReadinessOptions,
    navigation_delay: Duration,
}

impl Session {
    pub fn new(initial_location: impl Into<String>) -> Self {
        Self {
            watcher: NavigationWatcher::new(initial_location),
            readiness: ReadinessOptions::default(),
            navigation_delay: DEFAULT_NAVIGATION_DELAY,
        }
    }

    pub fn readiness(mut self, readiness: ReadinessOptions) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn navigation_delay(mut self, delay: Duration) -> Self {
        self.navigation_delay = delay;
        self
    }

    pub fn watcher(&self) -> &NavigationWatcher {
        &self.watcher
    }

    /// Attaches the sort button for the current location.
    pub async fn start(&self, doc: &Document) -> AttachOutcome {
        let location = self.watcher.last().unwrap_or_default();
        attach(doc, location, &self.readiness).await
    }

    /// Handles a change notification from the host.
    ///
    /// Returns None when the location did not actually change. Otherwise the
    /// old button is removed at once and attachment is retried after the
    /// navigation delay.
    pub async fn on_location_change(
        &mut self,
        doc: &Document,
        location: &str,
    ) -> Option<AttachOutcome> {
        if !self.watcher.check_and_update(location) {
            return None;
        }
        info!(location, "location changed");

        remove_sort_button(doc);
        sleep(self.navigation_delay).await;
        Some(attach(doc, location, &self.readiness).await)
    }
}

/// Waits for the chip bar on a channel page and places the sort button in it.
pub async fn attach(doc: &Document, location: &str, readiness: &ReadinessOptions) -> AttachOutcome {
    if !is_channel_page(&location_path(location)) {
        debug!(location, "not on a channel page");
        return AttachOutcome::NotChannelPage;
    }

    info!("initializing");
    match wait_until(readiness, || inject_sort_button(doc)).await {
        Ok(attempts) => {
            info!(attempts, "sort button ready");
            AttachOutcome::Attached { attempts }
        }
        Err(err) => {
            info!(error = %err, "could not find chip bar");
            AttachOutcome::GaveUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNEL: &str = "https://www.youtube.com/@creator/videos";
    const CHIP_HEADER: &str = r#"<html><body><div id="container"><div id="scroll-container"><div id="chips"></div></div><div id="right-arrow"></div></div></body></html>"#;

    fn fast() -> ReadinessOptions {
        ReadinessOptions {
            interval: Duration::from_millis(1),
            max_attempts: 3,
        }
    }

    #[test]
    fn test_watcher_reports_only_changes() {
        let mut watcher = NavigationWatcher::new("https://a.test/@x");
        assert!(!watcher.check_and_update("https://a.test/@x"));
        assert!(watcher.check_and_update("https://a.test/@y"));
        assert!(!watcher.check_and_update("https://a.test/@y"));
        assert_eq!(watcher.last(), Some("https://a.test/@y"));
    }

    #[test]
    fn test_empty_watcher_reports_first_location() {
        let mut watcher = NavigationWatcher::default();
        assert!(watcher.check_and_update("/"));
        assert!(!watcher.check_and_update("/"));
    }

    #[test]
    fn test_location_path() {
        assert_eq!(location_path(CHANNEL), "/@creator/videos");
        assert_eq!(location_path("/channel/UC1"), "/channel/UC1");
    }

    #[tokio::test]
    async fn test_start_attaches_on_channel_page() {
        let doc = Document::from(CHIP_HEADER);
        let session = Session::new(CHANNEL).readiness(fast());

        assert_eq!(session.start(&doc).await, AttachOutcome::Attached { attempts: 1 });
        assert!(doc.select("#sort-by-views-btn").exists());
    }

    #[tokio::test]
    async fn test_start_skips_other_pages() {
        let doc = Document::from(CHIP_HEADER);
        let session = Session::new("https://www.youtube.com/watch?v=abc").readiness(fast());

        assert_eq!(session.start(&doc).await, AttachOutcome::NotChannelPage);
        assert!(!doc.select("#sort-by-views-btn").exists());
    }

    #[tokio::test]
    async fn test_start_gives_up_without_chip_bar() {
        let doc = Document::from("<html><body></body></html>");
        let session = Session::new(CHANNEL).readiness(fast());

        assert_eq!(session.start(&doc).await, AttachOutcome::GaveUp);
    }

    #[tokio::test]
    async fn test_navigation_away_removes_button() {
        let doc = Document::from(CHIP_HEADER);
        let mut session = Session::new(CHANNEL)
            .readiness(fast())
            .navigation_delay(Duration::from_millis(1));
        session.start(&doc).await;

        assert_eq!(session.on_location_change(&doc, CHANNEL).await, None);
        assert!(doc.select("#sort-by-views-btn").exists());

        let outcome = session
            .on_location_change(&doc, "https://www.youtube.com/watch?v=abc")
            .await;
        assert_eq!(outcome, Some(AttachOutcome::NotChannelPage));
        assert!(!doc.select("#sort-by-views-btn").exists());
    }
}
