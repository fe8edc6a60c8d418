use an_core::{Article, Error, Result};

use super::parsers::{collect_articles, default_parsers, parse_items, FeedParser};
use crate::logging::Logger;

pub const ARXIV_FEED_URL: &str = "https://export.arxiv.org/rss/cs.AI";

/// Only the first items of the feed are ever turned into articles.
pub const FEED_ITEM_LIMIT: usize = 10;

/// Downloads the arXiv feed and normalizes its items. Every call refetches.
pub struct FeedFetcher {
    client: reqwest::Client,
    url: String,
    parsers: Vec<Box<dyn FeedParser>>,
    logger: Logger,
}

impl FeedFetcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            parsers: default_parsers(),
            logger: Logger::new().with_prefix("[arxiv]"),
        }
    }

    pub fn with_parsers(mut self, parsers: Vec<Box<dyn FeedParser>>) -> Self {
        self.parsers = parsers;
        self
    }

    pub async fn fetch_feed(&self) -> Result<Vec<Article>> {
        self.logger.info(&format!("Fetching feed from {}", self.url));

        let upstream = |e: reqwest::Error| {
            Error::UpstreamUnavailable(format!("Failed to fetch feed from {}: {}", self.url, e))
        };
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .bytes()
            .await
            .map_err(upstream)?;

        let items = parse_items(&self.parsers, &body)?;
        let (articles, skipped) = collect_articles(items.into_iter().take(FEED_ITEM_LIMIT));
        if skipped > 0 {
            self.logger.warn(&format!("Skipped {} malformed feed items", skipped));
        }
        if articles.is_empty() {
            return Err(Error::EmptyFeed);
        }

        self.logger.debug(&format!("Parsed {} articles", articles.len()));
        Ok(articles)
    }
}
