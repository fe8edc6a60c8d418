use an_core::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

pub mod arxiv;
pub mod article;
pub mod parsers;

pub use arxiv::{FeedFetcher, ARXIV_FEED_URL, FEED_ITEM_LIMIT};
pub use article::ArticleExtractor;
pub use parsers::{default_parsers, FeedItem, FeedParser, FeedRsParser, MarkupParser};

const USER_AGENT: &str = concat!("an/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by the feed fetcher and the article extractor.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

    /// Parses an absolute http(s) URL.
    pub fn parse_url(url: &str) -> Result<Url> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(Error::InvalidUrl(format!("unsupported scheme {:?} in {}", scheme, url))),
        }
    }

    pub fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::Scraping(format!("Invalid selector {:?}: {}", css, e)))
    }

    /// Trimmed text of the first element matching `css`, if it has any.
    pub fn extract_text(document: &Html, css: &str) -> Result<Option<String>> {
        let selector = selector(css)?;
        Ok(document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty()))
    }

    /// Every visible text segment below `element`, trimmed and joined with newlines.
    pub fn collect_text(element: ElementRef<'_>) -> String {
        element
            .descendants()
            .filter(|node| {
                !node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
                })
            })
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(text.trim()),
                _ => None,
            })
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reformats a feed date as "Month DD, YYYY", taking the calendar day in UTC.
    pub fn format_date(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
            return Some(date.with_timezone(&Utc).format("%B %d, %Y").to_string());
        }
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc).format("%B %d, %Y").to_string());
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(date.format("%B %d, %Y").to_string());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|date| date.format("%B %d, %Y").to_string())
    }
}
