// ABOUTME: Bounded fixed-interval polling for page regions that render after load.
// ABOUTME: Retries a readiness check until it succeeds or the attempt budget runs out.

use tokio::time::sleep;
use tracing::debug;

use crate::error::ReadinessError;
use crate::options::ReadinessOptions;

/// Calls `ready` every `opts.interval` until it returns true.
///
/// The first call happens after one interval. Returns the number of the
/// attempt that succeeded, or `ReadinessError::GaveUp` after
/// `opts.max_attempts` failures.
pub async fn wait_until<F>(opts: &ReadinessOptions, mut ready: F) -> Result<u32, ReadinessError>
where
    F: FnMut() -> bool,
{
    for attempt in 1..=opts.max_attempts {
        sleep(opts.interval).await;
        if ready() {
            debug!(attempt, "ready");
            return Ok(attempt);
        }
        debug!(attempt, "not ready, will retry");
    }

    Err(ReadinessError::GaveUp {
        attempts: opts.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast(max_attempts: u32) -> ReadinessOptions {
        ReadinessOptions {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_succeeds_on_later_attempt() {
        let mut calls = 0;
        let result = wait_until(&fast(5), || {
            calls += 1;
            calls == 3
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let mut calls = 0;
        let result = wait_until(&fast(4), || {
            calls += 1;
            false
        })
        .await;

        assert_eq!(result, Err(ReadinessError::GaveUp { attempts: 4 }));
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn test_zero_budget_never_checks() {
        let mut calls = 0;
        let result = wait_until(&fast(0), || {
            calls += 1;
            true
        })
        .await;

        assert_eq!(result, Err(ReadinessError::GaveUp { attempts: 0 }));
        assert_eq!(calls, 0);
    }
}
