use scraper::Html;

use crate::{
    config::CrawlConfig,
    db::Pool,
    error::RunError,
    extract::extract_document,
    pagination::has_next_document,
    persist::{self, PersistOutcome},
    review::{IdentifiedReview, ReviewRecord, identify_all},
    scrape::{Fetch, Session},
};

/// URL of the `page`th listing page. The first page is the bare base URL.
pub fn page_url(base: &str, page: u32) -> String {
    if page <= 1 {
        base.to_owned()
    } else {
        let sep = if base.contains('?') { '&' } else { '?' };
        format!("{base}{sep}p={page}")
    }
}

fn parse_page(markup: &str) -> (Vec<ReviewRecord>, bool) {
    let html = Html::parse_document(markup);
    (extract_document(&html), has_next_document(&html))
}

/// Walks the listing from page 1 until a page has no "next" link, then tags
/// every review with its identity. Any failed fetch aborts the whole crawl.
pub async fn crawl<F: Fetch>(fetcher: &F, base_url: &str) -> Result<Vec<IdentifiedReview>, RunError> {
    let mut current_page = 1;
    let mut accumulator = Vec::new();

    loop {
        let url = page_url(base_url, current_page);
        tracing::info!(target: "crawler", "[Page #{current_page}] fetching {url}");

        let markup = match fetcher.fetch(&url).await {
            Ok(markup) => markup,
            Err(source) => {
                tracing::error!(target: "crawler", "\x1b[31m[Page #{current_page}] {source}\x1b[0m");
                return Err(RunError::Fetch { page: current_page, source });
            }
        };

        let (mut records, has_next) = parse_page(&markup);
        tracing::info!(target: "crawler", "[Page #{current_page}] {} reviews, next = {has_next}", records.len());
        accumulator.append(&mut records);

        if !has_next {
            break;
        }
        current_page += 1;
    }

    tracing::info!(target: "crawler", "\x1b[36m{} reviews over {current_page} pages\x1b[0m", accumulator.len());
    Ok(identify_all(accumulator))
}

pub struct Crawler {
    config: CrawlConfig,
}

impl Crawler {
    pub const fn new(config: CrawlConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls and identifies without touching the store.
    pub async fn collect(&self) -> Result<Vec<IdentifiedReview>, RunError> {
        let session = Session::open(&self.config).await?;
        crawl(&session, &self.config.base_url).await
    }

    /// One full run: crawl, identify, then a single insert of the whole batch.
    /// The transport session is released when this returns, whatever the outcome.
    pub async fn run(&self, pool: &Pool) -> Result<PersistOutcome, RunError> {
        let session = Session::open(&self.config).await?;
        let batch = crawl(&session, &self.config.base_url).await?;
        let outcome = persist::save_pooled(pool, &batch).await?;
        Ok(outcome)
    }
}
