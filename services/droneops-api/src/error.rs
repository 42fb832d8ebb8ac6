//! HTTP error mapping
//!
//! Every failure is returned as `{"error": "<message>"}` with a status that
//! tells the caller whose fault it was.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use droneops_domain::DomainError;
use droneops_store::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::MissionNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::InvalidAddress { .. }) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::MissionNotFound(_)) => "Mission not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "request failed");
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
