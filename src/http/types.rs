use axum::response::{IntoResponse, Response};
use axum::Json;
use ::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::application::response::{ApiCollectionResponse, ApiResponse, FailureKind};

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INTERNAL_ERROR: &str = "An internal server error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Attached to a 500 response so the error middleware can log the cause and
/// decide how much of it to expose.
#[derive(Debug, Clone)]
pub struct InternalFailure {
    pub chain: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let body = ApiResponse::<()>::fail_with_errors(FailureKind::Validation, VALIDATION_FAILED, errors);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Internal(error) => {
                let chain = error.chain().map(ToString::to_string).collect();
                let body = ApiResponse::<()>::fail_with_errors(FailureKind::Failed, INTERNAL_ERROR, Vec::new());
                let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
                response.extensions_mut().insert(InternalFailure { chain });
                response
            }
        }
    }
}

fn status_for(failure: Option<FailureKind>) -> StatusCode {
    match failure {
        None => StatusCode::OK,
        Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
        Some(_) => StatusCode::BAD_REQUEST,
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response { (status_for(self.failure), Json(self)).into_response() }
}

impl<T: Serialize> IntoResponse for ApiCollectionResponse<T> {
    fn into_response(self) -> Response { (StatusCode::OK, Json(self)).into_response() }
}

pub fn parse_id(s: &str) -> Result<i64, ApiError> {
    s.parse::<i64>().map_err(|_| ApiError::Validation(vec![format!("Invalid id `{s}`")]))
}
