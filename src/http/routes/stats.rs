use axum::{extract::State, routing::get, Router};

use crate::{
    application::{
        category_service::CategoryService,
        response::ApiResponse,
        stats::{overall_stats, OverallStats},
        todo_item_service::TodoItemService,
    },
    http::types::ApiError,
};

#[derive(Clone)]
pub struct AppState<C: CategoryService, T: TodoItemService> {
    pub categories: C,
    pub todo_items: T,
}

pub fn router<C, T>(state: AppState<C, T>) -> Router
where
    C: CategoryService + Clone + Send + Sync + 'static,
    T: TodoItemService + Clone + Send + Sync + 'static,
{
    Router::new().route("/api/stats", get(get_overall_stats::<C, T>)).with_state(state)
}

async fn get_overall_stats<C: CategoryService, T: TodoItemService>(State(state): State<AppState<C, T>>) -> Result<ApiResponse<OverallStats>, ApiError> {
    Ok(overall_stats(&state.categories, &state.todo_items).await?)
}
