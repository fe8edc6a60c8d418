pub mod cli;
pub mod logging;
pub mod scrapers;

pub use cli::{handle_command, ScraperCommands};
pub use scrapers::{http_client, ArticleExtractor, FeedFetcher, ARXIV_FEED_URL};

pub mod prelude {
    pub use super::scrapers::{ArticleExtractor, FeedFetcher, FeedParser};
    pub use an_core::{Article, Error, ExtractedArticle, Result};
}
