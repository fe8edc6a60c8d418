use an_core::types::NO_TITLE_FOUND;
use an_core::{Error, ExtractedArticle, Result};
use scraper::Html;

use super::utils;
use crate::logging::Logger;

/// Tried in order; the first match is taken as the article body.
const CONTENT_SELECTORS: [&str; 3] = ["article", "main", ".content"];

/// Pulls the readable text out of an arbitrary web page.
pub struct ArticleExtractor {
    client: reqwest::Client,
    logger: Logger,
}

impl ArticleExtractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            logger: Logger::new().with_prefix("[article]"),
        }
    }

    pub async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
        let target = utils::parse_url(url)?;
        self.logger.info(&format!("Extracting {}", target));

        let upstream =
            |e: reqwest::Error| Error::UpstreamUnavailable(format!("Failed to fetch {}: {}", url, e));
        let html = self
            .client
            .get(target)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .text()
            .await
            .map_err(upstream)?;

        extract_from_html(&html)
    }
}

/// Picks the main-content node (falling back to the body) and returns its text with the page title.
pub fn extract_from_html(html: &str) -> Result<ExtractedArticle> {
    let document = Html::parse_document(html);

    let mut main = None;
    for css in CONTENT_SELECTORS {
        let selector = utils::selector(css)?;
        if let Some(element) = document.select(&selector).next() {
            main = Some(element);
            break;
        }
    }
    let main = match main {
        Some(element) => element,
        None => {
            let body = utils::selector("body")?;
            document
                .select(&body)
                .next()
                .unwrap_or_else(|| document.root_element())
        }
    };

    let title = utils::extract_text(&document, "title")?.unwrap_or_else(|| NO_TITLE_FOUND.to_string());

    Ok(ExtractedArticle {
        title,
        content: utils::collect_text(main),
    })
}
