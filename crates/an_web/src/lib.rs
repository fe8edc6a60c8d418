use axum::Router;
use std::sync::Arc;

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    routes::router(Arc::new(state))
}

pub mod prelude {
    pub use an_core::{Article, Error, Result};
    pub use crate::{create_app, AppState};
}
