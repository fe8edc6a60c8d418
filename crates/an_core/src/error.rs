use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// An external site could not be reached or answered with a non-success status.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// No parser strategy produced a single feed item.
    #[error("Failed to parse feed: {0}")]
    FeedParse(String),

    #[error("Feed contained no usable articles")]
    EmptyFeed,

    /// A single feed item was malformed. Recovered locally, never returned to clients.
    #[error("Failed to extract feed item: {0}")]
    ItemExtraction(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for failures caused by talking to an external site rather than by our own processing.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::UpstreamUnavailable(_) | Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
