mod puppeteer;

use core::time::Duration;

use rand::seq::IndexedRandom;
use reqwest::Client as Request;

pub use puppeteer::BrowserSession;

use crate::{
    config::{CrawlConfig, TransportKind},
    error::{FetchError, RunError},
};

pub static USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:140.0) Gecko/20100101 Firefox/140.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
];

pub fn random_user_agent() -> &'static str {
    USER_AGENTS.choose(&mut rand::rng()).copied().unwrap_or(USER_AGENTS[0])
}

pub fn basic() -> reqwest::Result<Request> {
    Request::builder()
        .user_agent(random_user_agent())
        .connect_timeout(const { Duration::from_secs(8) })
        .build()
}

/// Source of a page's markup.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub struct Direct {
    client: Request,
}

impl Direct {
    pub const fn new(client: Request) -> Self {
        Self { client }
    }
}

impl Fetch for Direct {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

/// Transport owned by a single run. A browser, if any, lives exactly as long
/// as this value.
pub enum Session {
    Direct(Direct),
    Browser(BrowserSession),
}

impl Session {
    pub async fn open(config: &CrawlConfig) -> Result<Self, RunError> {
        match config.transport {
            TransportKind::Direct => Ok(Self::Direct(Direct::new(basic().map_err(RunError::Client)?))),
            TransportKind::Browser => BrowserSession::launch(!config.headful)
                .await
                .map(Self::Browser)
                .map_err(|e| RunError::Browser(format!("{e:#}"))),
        }
    }
}

impl Fetch for Session {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self {
            Self::Direct(direct) => direct.fetch(url).await,
            Self::Browser(browser) => browser.fetch(url).await,
        }
    }
}
