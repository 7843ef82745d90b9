// ABOUTME: Notification seam for messages shown to the person who triggered a sort.
// ABOUTME: Closures implement Notifier directly; LogNotifier routes messages into tracing.

use tracing::info;

/// Receives user-facing messages (success toast, empty-page notice).
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Writes messages to the log instead of a display surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "viewsort::notify", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn send(notifier: &dyn Notifier, message: &str) {
        notifier.notify(message);
    }

    #[test]
    fn test_closure_receives_message() {
        let seen = RefCell::new(Vec::new());
        send(
            &|m: &str| seen.borrow_mut().push(m.to_string()),
            "Sorted 4 videos by view count!",
        );
        assert_eq!(*seen.borrow(), vec!["Sorted 4 videos by view count!"]);
    }

    #[test]
    fn test_log_notifier_accepts_messages() {
        send(&LogNotifier, "Sorted 0 videos by view count!");
    }
}
