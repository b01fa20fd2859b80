use std::time::Duration;

use anyhow::Context;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};

const TABLE_SELECTOR: &str = "table.views-table";
const NEXT_SELECTOR: &str = "a[title*='Go to next page']";
const WAIT_BUDGET: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Outcome of one paginator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pager {
    Advanced,
    Done,
}

/// A headless Chrome session scoped to one scraping run.
///
/// The caller runs the pipeline, captures its result, calls `close()`, then
/// returns the result, so the browser process is torn down on every exit path.
pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl Session {
    pub async fn launch() -> anyhow::Result<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| anyhow::anyhow!(e))?;
        let (browser, mut events) = Browser::launch(config)
            .await
            .context("Failed to launch headless Chrome")?;

        // Drive the CDP event stream until the browser goes away.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        Ok(Self {
            browser,
            handler,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate and block until the results table is present.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.wait_for_table().await
    }

    /// Bounded poll for the results table instead of a fixed settle sleep.
    pub async fn wait_for_table(&self) -> Result<()> {
        let deadline = Instant::now() + WAIT_BUDGET;
        loop {
            if self.page.find_element(TABLE_SELECTOR).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::NavigationTimeout(WAIT_BUDGET));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// One paginator step: click the next-page control if it is present and
    /// enabled, then wait for the table to re-attach. Everything else is
    /// pagination exhaustion, a normal terminal state rather than an error.
    pub async fn next_page(&self) -> Pager {
        let control = match self.page.find_element(NEXT_SELECTOR).await {
            Ok(el) => el,
            Err(_) => return Pager::Done,
        };
        let class = control.attribute("class").await.ok().flatten();
        if !control_is_enabled(class.as_deref()) {
            return Pager::Done;
        }
        if let Err(e) = control.click().await {
            debug!("Next-page click failed: {e}");
            return Pager::Done;
        }
        let _ = self.page.wait_for_navigation().await;
        match self.wait_for_table().await {
            Ok(()) => Pager::Advanced,
            Err(e) => {
                warn!("Stopping pagination: {e}");
                Pager::Done
            }
        }
    }

    /// Current page URL, for resolving relative document links.
    pub async fn current_url(&self) -> Option<String> {
        self.page.url().await.ok().flatten()
    }

    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {e}");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}

/// The pager link carries a `disabled` class on the last page.
fn control_is_enabled(class: Option<&str>) -> bool {
    !class.is_some_and(|c| c.contains("disabled"))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_enabled_without_class() {
        assert!(control_is_enabled(None));
    }

    #[test]
    fn control_enabled_with_other_classes() {
        assert!(control_is_enabled(Some("pager-next active")));
    }

    #[test]
    fn disabled_class_ends_pagination() {
        assert!(!control_is_enabled(Some("pager-next disabled")));
    }
}
