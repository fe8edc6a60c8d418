//! Feed parser strategies, tried in order until one finds items.

use an_core::{Article, Error, Result};
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::utils;

/// Raw fields of one feed item before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub creator: Option<String>,
    pub categories: Vec<String>,
}

impl FeedItem {
    /// Normalizes the item. Fails only when it carries no title, link or description.
    pub fn into_article(self) -> Result<Article> {
        let is_blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());
        if is_blank(&self.title) && is_blank(&self.link) && is_blank(&self.description) {
            return Err(Error::ItemExtraction(
                "item has no title, link or description".to_string(),
            ));
        }

        let date = self.published.as_deref().and_then(utils::format_date);
        let categories = self
            .categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(Article::new(
            self.title,
            self.link,
            self.description,
            date,
            self.creator,
            categories,
        ))
    }
}

pub trait FeedParser: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn parse(&self, bytes: &[u8]) -> Result<Vec<FeedItem>>;
}

/// Strict RSS/Atom parsing through `feed-rs`.
#[derive(Debug, Clone, Default)]
pub struct FeedRsParser;

impl FeedParser for FeedRsParser {
    fn name(&self) -> &'static str {
        "feed-rs"
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<FeedItem>> {
        let feed = feed_rs::parser::parse(bytes).map_err(|e| Error::FeedParse(e.to_string()))?;

        Ok(feed
            .entries
            .into_iter()
            .map(|entry| {
                let creator = if entry.authors.is_empty() {
                    None
                } else {
                    Some(
                        entry
                            .authors
                            .iter()
                            .map(|p| p.name.trim())
                            .collect::<Vec<_>>()
                            .join(", "),
                    )
                };

                FeedItem {
                    title: entry.title.map(|t| t.content),
                    link: entry.links.first().map(|l| l.href.clone()),
                    description: entry
                        .summary
                        .map(|s| s.content)
                        .or_else(|| entry.content.and_then(|c| c.body)),
                    published: entry.published.or(entry.updated).map(|d| d.to_rfc2822()),
                    creator,
                    categories: entry.categories.into_iter().map(|c| c.term).collect(),
                }
            })
            .collect())
    }
}

/// Lenient fallback that reads `<item>` elements out of malformed markup.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser;

impl MarkupParser {
    fn item_from_element(item: ElementRef<'_>) -> FeedItem {
        let mut feed_item = FeedItem::default();

        for child in item.children().filter_map(ElementRef::wrap) {
            let text = child.text().collect::<String>().trim().to_string();
            match child.value().name() {
                "title" => feed_item.title = Some(text),
                // HTML treats <link> as void, so its URL ends up in the following text node.
                "link" => {
                    feed_item.link = if text.is_empty() {
                        child
                            .next_sibling()
                            .and_then(|n| n.value().as_text().map(|t| t.trim().to_string()))
                            .filter(|t| !t.is_empty())
                    } else {
                        Some(text)
                    }
                }
                "description" | "summary" => feed_item.description = Some(text),
                "pubdate" | "dc:date" | "published" => feed_item.published = Some(text),
                "dc:creator" | "creator" | "author" => feed_item.creator = Some(text),
                "category" => feed_item.categories.push(text),
                _ => {}
            }
        }

        feed_item
    }
}

impl FeedParser for MarkupParser {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<FeedItem>> {
        let source = String::from_utf8_lossy(bytes)
            .replace("<![CDATA[", "")
            .replace("]]>", "");
        let document = Html::parse_document(&source);
        let item_selector = utils::selector("item")?;

        Ok(document
            .select(&item_selector)
            .map(Self::item_from_element)
            .collect())
    }
}

/// Preference order used by the feed fetcher.
pub fn default_parsers() -> Vec<Box<dyn FeedParser>> {
    vec![Box::new(FeedRsParser), Box::new(MarkupParser)]
}

/// Runs each parser in turn; the first one that yields items wins.
pub fn parse_items(parsers: &[Box<dyn FeedParser>], bytes: &[u8]) -> Result<Vec<FeedItem>> {
    for parser in parsers {
        match parser.parse(bytes) {
            Ok(items) if !items.is_empty() => {
                debug!(parser = parser.name(), count = items.len(), "Parsed feed items");
                return Ok(items);
            }
            Ok(_) => debug!(parser = parser.name(), "Parser found no items"),
            Err(e) => warn!(parser = parser.name(), error = %e, "Parser failed"),
        }
    }

    let tried = parsers.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ");
    Err(Error::FeedParse(format!("no items found (tried: {})", tried)))
}

/// Converts items into articles, skipping the ones that fail. Returns the articles and the skip count.
pub fn collect_articles(items: impl IntoIterator<Item = FeedItem>) -> (Vec<Article>, usize) {
    items
        .into_iter()
        .fold((Vec::new(), 0), |(mut articles, skipped), item| match item.into_article() {
            Ok(article) => {
                articles.push(article);
                (articles, skipped)
            }
            Err(e) => {
                warn!(error = %e, "Skipping feed item");
                (articles, skipped + 1)
            }
        })
}
