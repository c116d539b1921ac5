use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::LookupConfig;
use crate::error::{LookupError, LookupResult};
use crate::resolver::session::{RenderBackend, RenderSession};

/// Backend that launches one sandboxless headless chromium per session.
///
/// Nothing persists between sessions: no profile, no cookies, no prior
/// DOM. The per-call process startup is the price of that isolation.
pub struct ChromeBackend {
    user_agent: String,
    settle_window: Duration,
    remote_debug_port: u16,
    chrome_executable: Option<PathBuf>,
}

impl ChromeBackend {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            settle_window: config.settle_window,
            remote_debug_port: config.remote_debug_port,
            chrome_executable: config.chrome_executable.clone(),
        }
    }
}

#[async_trait]
impl RenderBackend for ChromeBackend {
    async fn open(&self) -> LookupResult<Box<dyn RenderSession>> {
        let mut builder = BrowserConfig::builder()
            .headless_mode(HeadlessMode::New)
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--disable-software-rasterizer")
            .arg("--disable-extensions")
            .arg(format!("--remote-debugging-port={}", self.remote_debug_port))
            .arg(format!("--user-agent={}", self.user_agent));

        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path.clone());
        }

        let browser_config = builder
            .build()
            .map_err(|e| LookupError::Session(format!("invalid browser config: {}", e)))?;

        // Launch failure (e.g. no chromium binary) is fatal to the call;
        // there is no fallback data source for display-name search.
        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| LookupError::Session(format!("failed to launch browser: {}", e)))?;

        // The CDP websocket must be drained for page commands to make
        // progress. Aborted at close.
        let handler_task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("cdp handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(LookupError::Session(format!("failed to open page: {}", e)));
            }
        };

        Ok(Box::new(ChromeSession {
            browser,
            handler_task,
            page,
            settle_window: self.settle_window,
        }))
    }
}

struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    settle_window: Duration,
}

#[async_trait]
impl RenderSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> LookupResult<()> {
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| LookupError::Session(format!("navigation failed: {}", e)))
    }

    /// Fixed settle window: the search page offers no results-ready signal,
    /// so a bounded wait is the only synchronization primitive available.
    async fn settle(&mut self) {
        tokio::time::sleep(self.settle_window).await;
    }

    async fn current_markup(&mut self) -> LookupResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| LookupError::Session(format!("failed to capture markup: {}", e)))
    }

    async fn close(&mut self) -> LookupResult<()> {
        let outcome = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();

        outcome.map_err(|e| LookupError::Session(format!("browser shutdown failed: {}", e)))?;
        Ok(())
    }
}
