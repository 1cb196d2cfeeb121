use crate::actions::BrowserActions;
use crate::error::{BrowserError, Result};
use crate::locator::{Locator, Query};
use crate::probe::{self, ElementState, TextProbe};
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::{Element, Page};
use formcheck_core::BrowserConfig;
use futures_util::stream::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::path::Path;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Chromium-backed browser session with a single page.
pub struct BrowserEngine {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserEngine {
    /// Launch a browser and open a blank page.
    ///
    /// `driver_path` points at the browser executable; chromiumoxide
    /// auto-detects one when it is `None`.
    pub async fn launch(config: &BrowserConfig, driver_path: Option<&Path>) -> Result<Self> {
        let mut builder = LaunchConfig::builder()
            .window_size(config.window_width, config.window_height)
            .viewport(None)
            .request_timeout(config.request_timeout());

        if !config.headless {
            builder = builder.with_head();
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = driver_path {
            builder = builder.chrome_executable(path);
        }

        let launch_config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(launch_config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            drain_events(&mut handler).await;
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(BrowserError::Launch(format!("failed to open page: {e}")));
            }
        };

        tracing::info!(
            "Browser launched ({}x{}, headless={})",
            config.window_width,
            config.window_height,
            config.headless
        );

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            page,
            handler,
        })
    }

    async fn ensure_open(&self) -> Result<()> {
        if self.browser.lock().await.is_some() {
            Ok(())
        } else {
            Err(BrowserError::SessionClosed)
        }
    }

    async fn find(&self, locator: &Locator) -> Result<Element> {
        self.ensure_open().await?;

        let found = match locator.query() {
            Query::Css(selector) => self.page.find_element(selector).await,
            Query::XPath(expr) => self.page.find_xpath(expr).await,
        };

        found.map_err(|e| {
            tracing::debug!("Lookup of {} failed: {}", locator, e);
            BrowserError::not_found(locator)
        })
    }

    async fn eval_json<T: DeserializeOwned>(&self, js: String) -> Result<T> {
        self.ensure_open().await?;

        let raw: String = self
            .page
            .evaluate(js)
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?
            .into_value()
            .map_err(|e| BrowserError::Script(e.to_string()))?;

        probe::decode(&raw)
    }
}

/// Pump CDP handler events until the connection ends.
///
/// Individual event errors are logged and skipped; only the end of the
/// stream stops the loop. Returns how many events were seen.
async fn drain_events<S, T, E>(events: &mut S) -> usize
where
    S: Stream<Item = std::result::Result<T, E>> + Unpin,
    E: Display,
{
    let mut seen = 0;
    while let Some(event) = events.next().await {
        seen += 1;
        if let Err(e) = event {
            tracing::debug!("CDP handler event error: {}", e);
        }
    }
    tracing::debug!("CDP handler event loop ended");
    seen
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        url::Url::parse(url).map_err(|e| BrowserError::Navigation(format!("Invalid URL: {e}")))?;
        self.ensure_open().await?;

        tracing::debug!("Navigating to {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()> {
        self.ensure_open().await?;

        tracing::debug!("Scrolling by ({}, {})", dx, dy);
        self.page
            .evaluate(probe::scroll_js(dx, dy))
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.find(locator).await?;

        tracing::debug!("Clicking {}", locator);
        element
            .click()
            .await
            .map_err(|e| BrowserError::Interaction {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.find(locator).await?;

        let focused: bool = self.eval_json(probe::focus_end_js(&locator.query())).await?;
        if !focused {
            return Err(BrowserError::not_found(locator));
        }

        tracing::debug!("Typing {} characters into {}", text.chars().count(), locator);
        element
            .type_str(text)
            .await
            .map_err(|e| BrowserError::Interaction {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn element_state(&self, locator: &Locator) -> Result<ElementState> {
        self.eval_json(probe::element_state_js(&locator.query()))
            .await
    }

    async fn text(&self, locator: &Locator) -> Result<String> {
        let probe: TextProbe = self
            .eval_json(probe::text_js(None, &locator.query()))
            .await?;

        match probe {
            TextProbe::Found { text } => Ok(text),
            TextProbe::Missing | TextProbe::ContainerMissing => {
                Err(BrowserError::not_found(locator))
            }
        }
    }

    async fn text_within(&self, container: &Locator, locator: &Locator) -> Result<String> {
        let probe: TextProbe = self
            .eval_json(probe::text_js(
                Some(&container.query()),
                &locator.query_within(),
            ))
            .await?;

        match probe {
            TextProbe::Found { text } => Ok(text),
            TextProbe::ContainerMissing => Err(BrowserError::not_found(container)),
            TextProbe::Missing => Err(BrowserError::not_found(format!(
                "{locator} within {container}"
            ))),
        }
    }

    async fn close(&mut self) -> Result<()> {
        let mut browser = self
            .browser
            .get_mut()
            .take()
            .ok_or(BrowserError::SessionClosed)?;

        tracing::debug!("Closing browser");
        let closed = browser.close().await;
        if let Err(e) = &closed {
            // Without the close command the child would never exit on its own
            tracing::warn!("Close command failed ({}), killing browser process", e);
            if let Some(Err(kill_err)) = browser.kill().await {
                tracing::debug!("Kill failed: {}", kill_err);
            }
        }
        let waited = browser.wait().await;
        self.handler.abort();

        closed.map_err(|e| BrowserError::Close(e.to_string()))?;
        waited.map_err(|e| BrowserError::Close(format!("browser process did not exit: {e}")))?;

        tracing::info!("Browser closed");
        Ok(())
    }
}
