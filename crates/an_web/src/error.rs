use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use an_core::Error;
use serde_json::json;

/// Error returned by handlers, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::UpstreamUnavailable(_) | Error::Http(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Rejected request");
        }

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
