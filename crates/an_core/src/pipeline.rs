//! Search, sort and pagination applied to a freshly fetched article list.

use std::cmp::Reverse;
use std::str::FromStr;

use serde::Deserialize;

use crate::types::{Article, PagedResult};
use crate::{Error, Result};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 9;
pub const MAX_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    None,
    Date,
    Title,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            other => Err(Error::InvalidQuery(format!(
                "sort must be one of none, date, title (got {:?})",
                other
            ))),
        }
    }
}

/// Raw query-string parameters, exactly as the client sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// Validated pipeline input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: SortKey,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortKey::None,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32, sort: SortKey, search: Option<String>) -> Result<Self> {
        if page < 1 {
            return Err(Error::InvalidQuery("page must be >= 1".to_string()));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(Error::InvalidQuery(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok(Self {
            page,
            limit,
            sort,
            search: search.filter(|s| !s.is_empty()),
        })
    }
}

impl TryFrom<ListParams> for ListQuery {
    type Error = Error;

    fn try_from(params: ListParams) -> Result<Self> {
        let page = parse_number("page", params.page.as_deref(), DEFAULT_PAGE)?;
        let limit = parse_number("limit", params.limit.as_deref(), DEFAULT_LIMIT)?;
        let sort = match params.sort.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortKey::None,
        };

        ListQuery::new(page, limit, sort, params.search)
    }
}

fn parse_number(name: &str, raw: Option<&str>, default: u32) -> Result<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| Error::InvalidQuery(format!("{} must be a positive integer (got {:?})", name, value))),
    }
}

/// Keeps articles whose title, summary or authors contain `term`, ignoring case.
pub fn filter_articles(articles: Vec<Article>, term: &str) -> Vec<Article> {
    let needle = term.to_lowercase();
    articles
        .into_iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&needle)
                || a.summary.to_lowercase().contains(&needle)
                || a.authors.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort. Dates compare as plain strings with a missing date treated as "".
pub fn sort_articles(articles: &mut [Article], key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::Date => {
            articles.sort_by(|a, b| {
                Reverse(a.date.as_deref().unwrap_or("")).cmp(&Reverse(b.date.as_deref().unwrap_or("")))
            });
        }
        SortKey::Title => articles.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

pub fn paginate(articles: Vec<Article>, page: u32, limit: u32) -> PagedResult {
    let total = articles.len();
    let per_page = limit.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(per_page);

    let articles = articles
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    PagedResult {
        articles,
        total,
        page,
        limit,
        total_pages: total.div_ceil(per_page),
    }
}

/// Filter, then sort, then paginate.
pub fn apply(articles: Vec<Article>, query: &ListQuery) -> PagedResult {
    let mut articles = match query.search.as_deref() {
        Some(term) => filter_articles(articles, term),
        None => articles,
    };
    sort_articles(&mut articles, query.sort);
    paginate(articles, query.page, query.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn article(title: &str, summary: &str, authors: &str, date: Option<&str>) -> Article {
        Article::new(
            Some(title.to_string()),
            Some(format!("https://arxiv.org/abs/{}", title.replace(' ', "-"))),
            Some(summary.to_string()),
            date.map(str::to_string),
            Some(authors.to_string()),
            vec!["cs.AI".to_string()],
        )
    }

    fn ten_articles() -> Vec<Article> {
        (0..10)
            .map(|i| {
                let title = if i % 3 == 0 {
                    format!("Transformer study {}", i)
                } else {
                    format!("Planning paper {}", i)
                };
                article(&title, "An abstract", "Jane Doe", Some("October 01, 2026"))
            })
            .collect()
    }

    #[test]
    fn test_first_and_second_page() {
        let query = ListQuery::default();
        let page1 = apply(ten_articles(), &query);
        assert_eq!(page1.articles.len(), 9);
        assert_eq!(page1.total, 10);
        assert_eq!(page1.total_pages, 2);

        let query = ListQuery { page: 2, ..ListQuery::default() };
        let page2 = apply(ten_articles(), &query);
        assert_eq!(page2.articles.len(), 1);
        assert_eq!(page2.articles[0].title, "Transformer study 9");
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let query = ListQuery { page: 7, ..ListQuery::default() };
        let result = apply(ten_articles(), &query);
        assert!(result.articles.is_empty());
        assert_eq!(result.total, 10);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let query = ListQuery {
            search: Some("transformer".to_string()),
            ..ListQuery::default()
        };
        let result = apply(ten_articles(), &query);
        assert_eq!(result.total, 4);
        assert!(result
            .articles
            .iter()
            .all(|a| a.title.to_lowercase().contains("transformer")));

        let articles = vec![
            article("A", "uses TRANSFORMERS", "x", None),
            article("B", "nothing", "Transformer Group", None),
            article("C", "nothing", "nobody", None),
        ];
        let filtered = filter_articles(articles, "Transformer");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_sort_by_title() {
        let mut articles = vec![
            article("beta", "", "", None),
            article("Alpha", "", "", None),
            article("alpha", "", "", None),
        ];
        sort_articles(&mut articles, SortKey::Title);
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn test_sort_by_date_puts_missing_last() {
        let mut articles = vec![
            article("a", "", "", None),
            article("b", "", "", Some("March 02, 2026")),
            article("c", "", "", Some("October 10, 2026")),
        ];
        sort_articles(&mut articles, SortKey::Date);
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_no_sort_keeps_feed_order() {
        let mut articles = ten_articles();
        let before = articles.clone();
        sort_articles(&mut articles, SortKey::None);
        assert_eq!(articles, before);
    }

    #[test]
    fn test_params_defaults_and_validation() {
        let query = ListQuery::try_from(ListParams::default()).unwrap();
        assert_eq!(query, ListQuery::default());

        let params = ListParams {
            page: Some("3".into()),
            limit: Some("50".into()),
            sort: Some("Title".into()),
            search: Some(String::new()),
        };
        let query = ListQuery::try_from(params).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 50);
        assert_eq!(query.sort, SortKey::Title);
        assert_eq!(query.search, None);

        for (page, limit, sort) in [
            ("0", "9", "date"),
            ("1", "0", "date"),
            ("1", "51", "date"),
            ("x", "9", "date"),
            ("1", "9", "popularity"),
        ] {
            let params = ListParams {
                page: Some(page.into()),
                limit: Some(limit.into()),
                sort: Some(sort.into()),
                search: None,
            };
            assert!(matches!(ListQuery::try_from(params), Err(Error::InvalidQuery(_))));
        }
    }

    fn arb_article() -> impl Strategy<Value = Article> {
        (
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z ]{0,8}",
            proptest::option::of("[A-Z][a-z]{2,8} [0-9]{2}, 20[0-9]{2}"),
        )
            .prop_map(|(title, summary, authors, date)| Article {
                title,
                link: "https://arxiv.org/abs/0000".to_string(),
                arxiv_id: "0000".to_string(),
                summary,
                date,
                authors,
                categories: vec![],
            })
    }

    proptest! {
        #[test]
        fn prop_beyond_last_page_is_empty(
            articles in proptest::collection::vec(arb_article(), 0..30),
            limit in 1u32..=50,
        ) {
            let total = articles.len();
            let page = (total as u32 / limit) + 2;
            let result = paginate(articles, page, limit);
            prop_assert!(result.articles.is_empty());
            prop_assert_eq!(result.total_pages, total.div_ceil(limit as usize));
        }

        #[test]
        fn prop_filter_is_idempotent(
            articles in proptest::collection::vec(arb_article(), 0..30),
            term in "[a-z]{1,3}",
        ) {
            let once = filter_articles(articles, &term);
            let twice = filter_articles(once.clone(), &term);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_sorted_orders(articles in proptest::collection::vec(arb_article(), 0..30)) {
            let mut by_title = articles.clone();
            sort_articles(&mut by_title, SortKey::Title);
            let titles_ordered = by_title.windows(2).all(|w| w[0].title <= w[1].title);
            prop_assert!(titles_ordered);

            let mut by_date = articles;
            sort_articles(&mut by_date, SortKey::Date);
            let dates_ordered = by_date
                .windows(2)
                .all(|w| w[0].date.as_deref().unwrap_or("") >= w[1].date.as_deref().unwrap_or(""));
            prop_assert!(dates_ordered);
        }

        #[test]
        fn prop_total_ignores_page_and_limit(
            articles in proptest::collection::vec(arb_article(), 0..30),
            page in 1u32..10,
            limit in 1u32..=50,
            term in proptest::option::of("[a-z]{1,2}"),
        ) {
            let baseline = apply(articles.clone(), &ListQuery {
                search: term.clone(),
                ..ListQuery::default()
            });
            let paged = apply(articles, &ListQuery {
                page,
                limit,
                sort: SortKey::None,
                search: term,
            });
            prop_assert_eq!(baseline.total, paged.total);
            prop_assert!(paged.articles.len() <= limit as usize);
        }
    }
}
