use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{get, patch},
    Router,
};

use crate::{
    application::{
        dto::{CreateTodoItemDto, TodoItemDto, UpdateTodoItemDto},
        filter::TodoItemFilter,
        response::{ApiCollectionResponse, ApiResponse},
        stats::TodoStats,
        todo_item_service::TodoItemService,
    },
    domain::todo_item::TodoItemId,
    http::{types::{parse_id, ApiError}, validation::ValidJson},
};

#[derive(Clone)]
pub struct AppState<S: TodoItemService> { pub service: S }

pub fn router<S: TodoItemService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/todoitems", get(list_todo_items::<S>).post(create_todo_item::<S>))
        .route("/api/todoitems/stats", get(todo_item_stats::<S>))
        .route("/api/todoitems/:id", get(get_todo_item::<S>).put(update_todo_item::<S>).delete(delete_todo_item::<S>))
        .route("/api/todoitems/:id/complete", patch(complete_todo_item::<S>))
        .with_state(state)
}

async fn list_todo_items<S: TodoItemService>(
    State(state): State<AppState<S>>,
    filter: Result<Query<TodoItemFilter>, QueryRejection>,
) -> Result<ApiCollectionResponse<TodoItemDto>, ApiError> {
    let Query(filter) = filter.map_err(|rejection| ApiError::Validation(vec![rejection.body_text()]))?;
    let filter = (filter != TodoItemFilter::default()).then_some(filter);
    Ok(state.service.list(filter).await?)
}

async fn get_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<ApiResponse<TodoItemDto>, ApiError> {
    let id = TodoItemId(parse_id(&id)?);
    Ok(state.service.get(id).await?)
}

async fn create_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, ValidJson(payload): ValidJson<CreateTodoItemDto>) -> Result<ApiResponse<TodoItemDto>, ApiError> {
    Ok(state.service.create(payload).await?)
}

async fn update_todo_item<S: TodoItemService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateTodoItemDto>,
) -> Result<ApiResponse<TodoItemDto>, ApiError> {
    let id = TodoItemId(parse_id(&id)?);
    Ok(state.service.update(id, payload).await?)
}

async fn delete_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<ApiResponse<bool>, ApiError> {
    let id = TodoItemId(parse_id(&id)?);
    Ok(state.service.delete(id).await?)
}

async fn complete_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<ApiResponse<TodoItemDto>, ApiError> {
    let id = TodoItemId(parse_id(&id)?);
    Ok(state.service.complete(id).await?)
}

async fn todo_item_stats<S: TodoItemService>(State(state): State<AppState<S>>) -> Result<ApiResponse<TodoStats>, ApiError> {
    Ok(state.service.stats().await?)
}
