use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    // Any origin, method and header; credentials stay disabled.
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::home))
        .route("/news/arxiv", get(handlers::list_arxiv))
        .route("/news/article", get(handlers::get_article))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
