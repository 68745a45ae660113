use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use ::http::{HeaderValue, StatusCode};
use uuid::Uuid;

use super::types::{InternalFailure, INTERNAL_ERROR};
use crate::application::response::{ApiResponse, FailureKind};
use crate::config::Environment;

pub const ERROR_ID_HEADER: &str = "x-error-id";
const PRODUCTION_MESSAGE: &str = "An error occurred. Please contact the administrator.";

/// Logs the full cause of every unexpected failure under a fresh error id
/// and rewrites the 500 body. Only development builds see the cause.
pub async fn handle_unexpected_errors(State(environment): State<Environment>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    let Some(failure) = response.extensions().get::<InternalFailure>().cloned() else { return response };

    let error_id = Uuid::new_v4();
    tracing::error!(%error_id, %method, %uri, error = %failure.chain.join(": "), "unhandled error");

    let body = if environment.is_development() {
        let mut errors = vec![format!("Error id: {error_id}")];
        errors.extend(failure.chain);
        ApiResponse::<()>::fail_with_errors(FailureKind::Failed, INTERNAL_ERROR, errors)
    } else {
        ApiResponse::<()>::fail_with_errors(FailureKind::Failed, PRODUCTION_MESSAGE, Vec::new())
    };

    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(&error_id.to_string()) {
        response.headers_mut().insert(ERROR_ID_HEADER, value);
    }
    response
}
