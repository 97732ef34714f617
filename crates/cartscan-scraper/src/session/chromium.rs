//! Chromium-backed rendering sessions over the DevTools protocol.
//!
//! Each [`ChromiumSession`] owns its own browser process: sessions are never
//! shared across extractors, so one hung platform cannot poison another's
//! DOM. Speaking CDP directly means no separate driver binary is needed —
//! only the browser executable path is configurable.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use cartscan_core::BrowserSettings;

use crate::error::ScraperError;
use crate::session::{ElementHandle, RenderSession, SessionFactory};

/// Poll interval for [`RenderSession::wait_for`]. Coarse enough to keep CDP
/// traffic low, fine enough that waits end well under the listing bound.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn session_err(context: &str, e: impl std::fmt::Display) -> ScraperError {
    ScraperError::Session {
        reason: format!("{context}: {e}"),
    }
}

fn page_err(url: &str, reason: impl std::fmt::Display) -> ScraperError {
    ScraperError::Page {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Spawns one headless Chromium per created session, configured from
/// [`BrowserSettings`].
pub struct ChromiumFactory {
    settings: BrowserSettings,
    navigation_timeout: Duration,
}

impl ChromiumFactory {
    #[must_use]
    pub fn new(settings: BrowserSettings, navigation_timeout: Duration) -> Self {
        Self {
            settings,
            navigation_timeout,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(&self.settings.chrome_bin)
            .window_size(self.settings.viewport_width, self.settings.viewport_height)
            .no_sandbox()
            .args(vec!["--disable-gpu", "--disable-dev-shm-usage"]);

        if !self.settings.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| session_err("invalid browser configuration", e))
    }
}

#[async_trait]
impl SessionFactory for ChromiumFactory {
    async fn create(&self) -> Result<Box<dyn RenderSession>, ScraperError> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| session_err("failed to launch browser", e))?;

        // The CDP event loop must be polled for the session to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(session_err("failed to open page", e));
            }
        };

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler_task,
            navigation_timeout: self.navigation_timeout,
        }))
    }
}

/// A live Chromium tab plus the process and event loop behind it.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<(), ScraperError> {
        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| page_err(url, "navigation timed out"))?
            .map(|_| ())
            .map_err(|e| page_err(url, e))
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool, ScraperError> {
        let deadline = Instant::now() + timeout;
        loop {
            let found = self
                .page
                .find_elements(selector)
                .await
                .map(|els| !els.is_empty())
                // Transient query failures during render are indistinguishable
                // from "not there yet"; keep polling until the bound.
                .unwrap_or(false);
            if found {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>, ScraperError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| page_err(selector, e))?;
        Ok(elements
            .into_iter()
            .map(|el| Box::new(ChromiumElement { inner: el }) as Box<dyn ElementHandle>)
            .collect())
    }

    async fn close(self: Box<Self>) -> Result<(), ScraperError> {
        let mut browser = self.browser;
        let result = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| session_err("failed to close browser", e));
        // Reap the child process so a failed close cannot leak it.
        let _ = browser.wait().await;
        self.handler_task.abort();
        result
    }
}

struct ChromiumElement {
    inner: Element,
}

#[async_trait]
impl ElementHandle for ChromiumElement {
    async fn attr(&self, name: &str) -> Result<Option<String>, ScraperError> {
        self.inner
            .attribute(name)
            .await
            .map_err(|e| page_err(name, e))
    }

    async fn text(&self) -> Result<Option<String>, ScraperError> {
        self.inner
            .inner_text()
            .await
            .map_err(|e| page_err("inner_text", e))
    }

    async fn find(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle>>, ScraperError> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>, ScraperError> {
        let elements = self
            .inner
            .find_elements(selector)
            .await
            .map_err(|e| page_err(selector, e))?;
        Ok(elements
            .into_iter()
            .map(|el| Box::new(ChromiumElement { inner: el }) as Box<dyn ElementHandle>)
            .collect())
    }
}
