use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{
    CapabilitiesHelper, ChromiumLikeCapabilities, DesiredCapabilities, PageLoadStrategy, WebDriver,
};

const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Seam between the orchestrator and the browser. Render failures are
/// terminal for the URL, so the contract is an `Option`, not a `Result`.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Option<String>;
}

pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    /// Headless Chrome session with an eager page-load strategy: we wait
    /// for DOM content loaded, not network idle, to bound latency on slow
    /// third-party assets.
    pub async fn new(webdriver_url: &str) -> anyhow::Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.set_page_load_strategy(PageLoadStrategy::Eager)?;

        let driver = WebDriver::new(webdriver_url, caps).await?;
        driver.set_page_load_timeout(PAGE_LOAD_TIMEOUT).await?;

        Ok(Droid { driver })
    }

    pub async fn quit(self) -> anyhow::Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

#[async_trait]
impl PageRenderer for Droid {
    async fn render(&self, url: &str) -> Option<String> {
        if let Err(e) = self.driver.goto(url).await {
            log::error!("Failed to render url: {} | Error: {:?}", url, e);
            return None;
        }

        match self.driver.source().await {
            Ok(html) => Some(html),
            Err(e) => {
                log::error!("Failed to read page source of {} | Error: {:?}", url, e);
                None
            }
        }
    }
}
