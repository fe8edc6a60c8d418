use an_core::Result;
use an_scrapers::{http_client, ArticleExtractor, FeedFetcher};

/// Immutable per-process state. Holds no articles; every request refetches.
pub struct AppState {
    pub feed: FeedFetcher,
    pub extractor: ArticleExtractor,
}

impl AppState {
    pub fn new(feed_url: &str) -> Result<Self> {
        let client = http_client()?;
        Ok(Self {
            feed: FeedFetcher::new(client.clone(), feed_url),
            extractor: ArticleExtractor::new(client),
        })
    }
}
