use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;
use an_core::{pipeline, Error, ExtractedArticle, ListParams, ListQuery, PagedResult};
use serde::Deserialize;
use serde_json::{json, Value};
use crate::{error::ApiError, AppState};

pub const WELCOME_MESSAGE: &str = "Welcome to the AI News Aggregator!";

#[derive(Debug, Deserialize)]
pub struct ArticleParams {
    pub url: Option<String>,
}

fn query_error(rejection: QueryRejection) -> ApiError {
    ApiError(Error::InvalidQuery(rejection.body_text()))
}

pub async fn home() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn list_arxiv(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PagedResult>, ApiError> {
    let Query(params) = params.map_err(query_error)?;
    let query = ListQuery::try_from(params)?;

    let articles = state.feed.fetch_feed().await?;
    let result = pipeline::apply(articles, &query);
    tracing::info!(
        total = result.total,
        page = result.page,
        returned = result.articles.len(),
        "Served arXiv page"
    );

    Ok(Json(result))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ArticleParams>, QueryRejection>,
) -> Result<Json<ExtractedArticle>, ApiError> {
    let Query(params) = params.map_err(query_error)?;
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| Error::InvalidQuery("url is required".to_string()))?;

    Ok(Json(state.extractor.extract(url.trim()).await?))
}
