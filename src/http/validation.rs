//! Request body validation run before any service call.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use super::types::ApiError;
use crate::application::dto::{CreateCategoryDto, CreateTodoItemDto, UpdateCategoryDto, UpdateTodoItemDto};

pub const CATEGORY_NAME_MAX: usize = 100;
pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;

/// Returns one message per violated field rule; empty means valid.
pub trait Validate {
    fn validate(&self) -> Vec<String>;
}

fn required(value: &str, max: usize, field: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    } else {
        max_length(value, max, field, errors);
    }
}

fn max_length(value: &str, max: usize, field: &str, errors: &mut Vec<String>) {
    if value.chars().count() > max {
        errors.push(format!("{field} cannot exceed {max} characters"));
    }
}

impl Validate for CreateCategoryDto {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        required(&self.name, CATEGORY_NAME_MAX, "Category name", &mut errors);
        errors
    }
}

impl Validate for UpdateCategoryDto {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        required(&self.name, CATEGORY_NAME_MAX, "Category name", &mut errors);
        errors
    }
}

impl Validate for CreateTodoItemDto {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        required(&self.title, TITLE_MAX, "Title", &mut errors);
        max_length(&self.description, DESCRIPTION_MAX, "Description", &mut errors);
        errors
    }
}

impl Validate for UpdateTodoItemDto {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        required(&self.title, TITLE_MAX, "Title", &mut errors);
        max_length(&self.description, DESCRIPTION_MAX, "Description", &mut errors);
        errors
    }
}

/// JSON body that has passed [`Validate`].
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![rejection.body_text()]))?;
        let errors = value.validate();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(Self(value))
    }
}
