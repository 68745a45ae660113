use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use super::{
    dto::{CreateTodoItemDto, TodoItemDto, UpdateTodoItemDto},
    filter::TodoItemFilter,
    mapping::new_todo_item,
    response::{ApiCollectionResponse, ApiResponse, FailureKind},
    stats::TodoStats,
};
use crate::domain::{
    category::CategoryId,
    repository::{CategoryRepository, TodoItemRepository},
    todo_item::TodoItemId,
};

#[async_trait]
pub trait TodoItemService: Send + Sync + 'static {
    async fn list(&self, filter: Option<TodoItemFilter>) -> Result<ApiCollectionResponse<TodoItemDto>>;
    async fn get(&self, id: TodoItemId) -> Result<ApiResponse<TodoItemDto>>;
    async fn create(&self, input: CreateTodoItemDto) -> Result<ApiResponse<TodoItemDto>>;
    async fn update(&self, id: TodoItemId, input: UpdateTodoItemDto) -> Result<ApiResponse<TodoItemDto>>;
    async fn delete(&self, id: TodoItemId) -> Result<ApiResponse<bool>>;
    async fn complete(&self, id: TodoItemId) -> Result<ApiResponse<TodoItemDto>>;
    async fn stats(&self) -> Result<ApiResponse<TodoStats>>;
}

#[derive(Clone)]
pub struct TodoItemServiceImpl<T: TodoItemRepository, C: CategoryRepository> {
    todo_items: T,
    categories: C,
}

impl<T: TodoItemRepository, C: CategoryRepository> TodoItemServiceImpl<T, C> {
    pub fn new(todo_items: T, categories: C) -> Self { Self { todo_items, categories } }

    async fn category_exists(&self, id: CategoryId) -> Result<bool> { Ok(self.categories.get(id).await?.is_some()) }
}

fn not_found<R>(id: TodoItemId) -> ApiResponse<R> {
    ApiResponse::fail(FailureKind::NotFound, format!("Todo item with ID {id} not found"))
}

fn unknown_category<R>(id: CategoryId) -> ApiResponse<R> {
    ApiResponse::fail(FailureKind::InvalidReference, format!("Category with ID {id} does not exist"))
}

#[async_trait]
impl<T: TodoItemRepository, C: CategoryRepository> TodoItemService for TodoItemServiceImpl<T, C> {
    #[tracing::instrument(skip(self), err)]
    async fn list(&self, filter: Option<TodoItemFilter>) -> Result<ApiCollectionResponse<TodoItemDto>> {
        let Some(filter) = filter else {
            let items = self.todo_items.list().await?;
            return Ok(ApiCollectionResponse::ok(items.into_iter().map(TodoItemDto::from).collect()));
        };

        // Narrow the fetch with the most selective store query, then apply
        // every criterion in memory.
        let candidates = if let Some(category_id) = filter.category_id {
            self.todo_items.list_by_category(category_id).await?
        } else if let Some(to) = filter.due_date_to {
            self.todo_items.list_due_before(to).await?
        } else {
            match filter.is_completed {
                Some(true) => self.todo_items.list_completed().await?,
                Some(false) => self.todo_items.list_pending().await?,
                None => self.todo_items.list().await?,
            }
        };
        let items = filter.apply(candidates);
        Ok(ApiCollectionResponse::ok(items.into_iter().map(TodoItemDto::from).collect()))
    }

    #[tracing::instrument(skip(self), err)]
    async fn get(&self, id: TodoItemId) -> Result<ApiResponse<TodoItemDto>> {
        match self.todo_items.get(id).await? {
            Some(item) => Ok(ApiResponse::ok(item.into())),
            None => Ok(not_found(id)),
        }
    }

    #[tracing::instrument(skip(self, input), fields(title = %input.title), err)]
    async fn create(&self, input: CreateTodoItemDto) -> Result<ApiResponse<TodoItemDto>> {
        if let Some(category_id) = input.category_id {
            if !self.category_exists(category_id).await? { return Ok(unknown_category(category_id)); }
        }

        let created = self.todo_items.create(new_todo_item(input, Utc::now())).await?;
        tracing::info!(todo_item_id = created.id.0, "todo item created");
        Ok(ApiResponse::ok_with_message(created.into(), "Todo item created successfully"))
    }

    #[tracing::instrument(skip(self, input), err)]
    async fn update(&self, id: TodoItemId, input: UpdateTodoItemDto) -> Result<ApiResponse<TodoItemDto>> {
        let Some(current) = self.todo_items.get(id).await? else { return Ok(not_found(id)) };

        if let Some(category_id) = input.category_id {
            if current.category_id != Some(category_id) && !self.category_exists(category_id).await? {
                return Ok(unknown_category(category_id));
            }
        }

        let Some(updated) = self.todo_items.update(id, input.into()).await? else { return Ok(not_found(id)) };
        tracing::info!(todo_item_id = id.0, "todo item updated");
        Ok(ApiResponse::ok_with_message(updated.into(), "Todo item updated successfully"))
    }

    #[tracing::instrument(skip(self), err)]
    async fn delete(&self, id: TodoItemId) -> Result<ApiResponse<bool>> {
        if !self.todo_items.delete(id).await? { return Ok(not_found(id)); }
        tracing::info!(todo_item_id = id.0, "todo item deleted");
        Ok(ApiResponse::ok_with_message(true, "Todo item deleted successfully"))
    }

    #[tracing::instrument(skip(self), err)]
    async fn complete(&self, id: TodoItemId) -> Result<ApiResponse<TodoItemDto>> {
        if !self.todo_items.mark_completed(id).await? { return Ok(not_found(id)); }
        let Some(item) = self.todo_items.get(id).await? else { return Ok(not_found(id)) };
        tracing::info!(todo_item_id = id.0, "todo item marked as completed");
        Ok(ApiResponse::ok_with_message(item.into(), "Todo item marked as completed"))
    }

    #[tracing::instrument(skip(self), err)]
    async fn stats(&self) -> Result<ApiResponse<TodoStats>> {
        let items = self.todo_items.list().await?;
        let completed = self.todo_items.list_completed().await?.len();
        let pending = self.todo_items.list_pending().await?.len();
        Ok(ApiResponse::ok_with_message(
            TodoStats::compute(&items, completed, pending, Utc::now()),
            "Todo item statistics",
        ))
    }
}
