use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use crate::probe::ElementState;
use std::time::Duration;
use tokio::time::Instant;

/// Browser actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Scroll the viewport by a relative offset
    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()>;

    /// Click an element
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Type into an element, appending to whatever it already holds
    async fn type_text(&self, locator: &Locator, text: &str) -> Result<()>;

    /// Report whether an element is present, visible and enabled
    async fn element_state(&self, locator: &Locator) -> Result<ElementState>;

    /// Extract the rendered text of an element
    async fn text(&self, locator: &Locator) -> Result<String>;

    /// Extract the rendered text of an element inside `container`
    async fn text_within(&self, container: &Locator, locator: &Locator) -> Result<String>;

    /// Release the browser session
    async fn close(&mut self) -> Result<()>;
}

/// Block until `locator` is clickable, probing every `poll`.
///
/// A missing element counts as "not yet". Any other driver error ends the
/// wait immediately. A timeout too large to represent as a deadline waits
/// without one.
pub async fn wait_until_clickable<B>(
    browser: &B,
    locator: &Locator,
    timeout: Duration,
    poll: Duration,
) -> Result<()>
where
    B: BrowserActions + ?Sized,
{
    let deadline = Instant::now().checked_add(timeout);

    loop {
        let state = browser.element_state(locator).await?;
        if state.is_clickable() {
            tracing::debug!("{} is clickable", locator);
            return Ok(());
        }

        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(BrowserError::WaitExpired {
                        locator: locator.to_string(),
                        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    });
                }
                poll.min(deadline - now)
            }
            None => poll,
        };

        tracing::debug!("{} is {:?}, polling again", locator, state);
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Becomes clickable on the `ready_at`-th probe.
    struct Countdown {
        ready_at: u32,
        probes: AtomicU32,
        fail: bool,
    }

    impl Countdown {
        fn new(ready_at: u32) -> Self {
            Self {
                ready_at,
                probes: AtomicU32::new(0),
                fail: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl BrowserActions for Countdown {
        async fn navigate(&self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn scroll_by(&self, _dx: i64, _dy: i64) -> Result<()> {
            Ok(())
        }

        async fn click(&self, _locator: &Locator) -> Result<()> {
            Ok(())
        }

        async fn type_text(&self, _locator: &Locator, _text: &str) -> Result<()> {
            Ok(())
        }

        async fn element_state(&self, _locator: &Locator) -> Result<ElementState> {
            if self.fail {
                return Err(BrowserError::Script("target closed".to_string()));
            }
            let n = self.probes.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(match n {
                n if n >= self.ready_at => ElementState::Clickable,
                1 => ElementState::Missing,
                _ => ElementState::Hidden,
            })
        }

        async fn text(&self, locator: &Locator) -> Result<String> {
            Err(BrowserError::not_found(locator))
        }

        async fn text_within(&self, _container: &Locator, locator: &Locator) -> Result<String> {
            Err(BrowserError::not_found(locator))
        }

        async fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_wait_returns_once_clickable() {
        let browser = Countdown::new(3);
        let locator = Locator::id("item-0");

        wait_until_clickable(
            &browser,
            &locator,
            Duration::from_secs(2),
            Duration::from_millis(5),
        )
        .await
        .expect("element becomes clickable");

        // Exactly as many probes as it took, no fewer
        assert_eq!(browser.probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_wait_expires() {
        let browser = Countdown::new(u32::MAX);
        let locator = Locator::id("item-0");

        let err = wait_until_clickable(
            &browser,
            &locator,
            Duration::from_millis(50),
            Duration::from_millis(10),
        )
        .await
        .unwrap_err();

        match err {
            BrowserError::WaitExpired {
                locator,
                timeout_ms,
            } => {
                assert_eq!(locator, "#item-0");
                assert_eq!(timeout_ms, 50);
            }
            other => panic!("expected WaitExpired, got {other:?}"),
        }
        assert!(browser.probes.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_wait_zero_timeout_still_probes_once() {
        let browser = Countdown::new(1);
        let locator = Locator::id("item-0");

        assert!(
            wait_until_clickable(&browser, &locator, Duration::ZERO, Duration::from_millis(5))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_wait_with_unrepresentable_timeout() {
        let browser = Countdown::new(3);

        wait_until_clickable(
            &browser,
            &Locator::id("item-0"),
            Duration::from_secs(u64::MAX),
            Duration::from_millis(5),
        )
        .await
        .expect("element becomes clickable");

        assert_eq!(browser.probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_wait_propagates_driver_errors() {
        let browser = Countdown {
            fail: true,
            ..Countdown::new(1)
        };
        let err = wait_until_clickable(
            &browser,
            &Locator::id("item-0"),
            Duration::from_secs(1),
            Duration::from_millis(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BrowserError::Script(_)));
    }
}
