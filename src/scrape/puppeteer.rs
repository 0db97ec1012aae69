use std::{ffi::OsStr, sync::Arc, time::Duration};

use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::task::spawn_blocking;

use crate::error::FetchError;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

pub fn puppeteer(headless: bool) -> anyhow::Result<Browser> {
    Browser::new(LaunchOptions {
        args: vec![OsStr::new("--disable-blink-features=AutomationControlled")],
        headless,
        idle_browser_timeout: IDLE_TIMEOUT,
        ..LaunchOptions::default()
    })
}

#[allow(clippy::significant_drop_tightening)]
pub fn first_tab(browser: &Browser) -> anyhow::Result<Arc<Tab>> {
    let tab = browser.new_tab()?;

    {
        let tabs_guard = browser
            .get_tabs()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for remain in &*tabs_guard {
            if !Arc::ptr_eq(&tab, remain) {
                remain.close(true)?;
            }
        }
    }

    Ok(tab)
}

/// A headless Chrome process with one tab. Dropping the session kills the
/// process.
pub struct BrowserSession {
    tab: Arc<Tab>,
    browser: Browser,
}

impl BrowserSession {
    pub async fn launch(headless: bool) -> anyhow::Result<Self> {
        let (browser, tab) = spawn_blocking(move || {
            let browser = puppeteer(headless)?;
            let tab = first_tab(&browser)?;
            tab.set_user_agent(super::random_user_agent(), None, None)?;
            anyhow::Ok((browser, tab))
        })
        .await??;

        tracing::info!(target: "browser", "launched (headless = {headless})");
        Ok(Self { tab, browser })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let tab = Arc::clone(&self.tab);
        let url = url.to_owned();

        spawn_blocking(move || {
            tab.navigate_to(&url)?.wait_until_navigated()?;
            tab.get_content()
        })
        .await
        .map_err(FetchError::browser)?
        .map_err(FetchError::browser)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let pid = self.browser.get_process_id();
        tracing::info!(target: "browser", "closing (pid = {pid:?})");
    }
}
