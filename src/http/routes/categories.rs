use axum::{extract::{Path, State}, routing::get, Router};

use crate::{
    application::{
        category_service::CategoryService,
        dto::{CategoryDto, CategoryWithItemsDto, CreateCategoryDto, UpdateCategoryDto},
        response::{ApiCollectionResponse, ApiResponse},
        stats::CategoryStats,
    },
    domain::category::CategoryId,
    http::{types::{parse_id, ApiError}, validation::ValidJson},
};

#[derive(Clone)]
pub struct AppState<S: CategoryService> { pub service: S }

pub fn router<S: CategoryService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories::<S>).post(create_category::<S>))
        .route("/api/categories/stats", get(category_stats::<S>))
        .route("/api/categories/:id", get(get_category::<S>).put(update_category::<S>).delete(delete_category::<S>))
        .with_state(state)
}

async fn list_categories<S: CategoryService>(State(state): State<AppState<S>>) -> Result<ApiCollectionResponse<CategoryDto>, ApiError> {
    Ok(state.service.list().await?)
}

async fn get_category<S: CategoryService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<ApiResponse<CategoryWithItemsDto>, ApiError> {
    let id = CategoryId(parse_id(&id)?);
    Ok(state.service.get(id).await?)
}

async fn create_category<S: CategoryService>(State(state): State<AppState<S>>, ValidJson(payload): ValidJson<CreateCategoryDto>) -> Result<ApiResponse<CategoryDto>, ApiError> {
    Ok(state.service.create(payload).await?)
}

async fn update_category<S: CategoryService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateCategoryDto>,
) -> Result<ApiResponse<CategoryDto>, ApiError> {
    let id = CategoryId(parse_id(&id)?);
    Ok(state.service.update(id, payload).await?)
}

async fn delete_category<S: CategoryService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<ApiResponse<bool>, ApiError> {
    let id = CategoryId(parse_id(&id)?);
    Ok(state.service.delete(id).await?)
}

async fn category_stats<S: CategoryService>(State(state): State<AppState<S>>) -> Result<ApiResponse<CategoryStats>, ApiError> {
    Ok(state.service.stats().await?)
}
