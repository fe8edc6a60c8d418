use serde::{Deserialize, Serialize};
use url::Url;

pub const NO_TITLE: &str = "No title";
pub const NO_LINK: &str = "#";
pub const UNKNOWN_AUTHORS: &str = "unknown";
pub const NO_TITLE_FOUND: &str = "No title found";

/// One entry of the syndication feed, normalized for the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub arxiv_id: String,
    pub summary: String,
    /// "Month DD, YYYY", or `None` when the feed date could not be read.
    pub date: Option<String>,
    pub authors: String,
    pub categories: Vec<String>,
}

impl Article {
    /// Builds an article, substituting sentinels for missing title, link and authors.
    pub fn new(
        title: Option<String>,
        link: Option<String>,
        summary: Option<String>,
        date: Option<String>,
        authors: Option<String>,
        categories: Vec<String>,
    ) -> Self {
        let title = non_blank(title).unwrap_or_else(|| NO_TITLE.to_string());
        let link = non_blank(link).unwrap_or_else(|| NO_LINK.to_string());
        let arxiv_id = arxiv_id_from_link(&link);

        Self {
            title,
            link,
            arxiv_id,
            summary: summary.map(|s| s.trim().to_string()).unwrap_or_default(),
            date,
            authors: non_blank(authors).unwrap_or_else(|| UNKNOWN_AUTHORS.to_string()),
            categories,
        }
    }
}

/// Readable text pulled out of an arbitrary web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
}

/// One page of articles plus the counts needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult {
    pub articles: Vec<Article>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

/// Last non-empty path segment of `link`; the link itself when it has none.
pub fn arxiv_id_from_link(link: &str) -> String {
    let segment = match Url::parse(link) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        Err(_) => link
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string),
    };

    segment.unwrap_or_else(|| link.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
