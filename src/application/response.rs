//! Envelope returned by every service operation; expected failures carry a [`FailureKind`].

use serde::Serialize;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Conflict,
    InvalidReference,
    Validation,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self { Self::ok_with_message(data, DEFAULT_SUCCESS_MESSAGE) }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: Some(data), errors: None, failure: None }
    }

    pub fn fail(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None, errors: None, failure: Some(kind) }
    }

    pub fn fail_with_errors(kind: FailureKind, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self { errors: Some(errors), ..Self::fail(kind, message) }
    }

    pub fn is_not_found(&self) -> bool { self.failure == Some(FailureKind::NotFound) }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCollectionResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub total_count: usize,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiCollectionResponse<T> {
    pub fn ok(data: Vec<T>) -> Self {
        let total_count = data.len();
        Self { success: true, message: DEFAULT_SUCCESS_MESSAGE.into(), data, total_count, errors: None }
    }
}
