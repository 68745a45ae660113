use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::category::{Category, CategoryId, CategoryWithItems, NewCategory};
use super::todo_item::{NewTodoItem, TodoItem, TodoItemChanges, TodoItemId};

#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// All categories in insertion order, each with its items.
    async fn list_with_items(&self) -> anyhow::Result<Vec<CategoryWithItems>>;
    async fn get(&self, id: CategoryId) -> anyhow::Result<Option<Category>>;
    async fn get_with_items(&self, id: CategoryId) -> anyhow::Result<Option<CategoryWithItems>>;
    /// Case-sensitive exact match.
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Option<Category>>;
    async fn create(&self, input: NewCategory) -> anyhow::Result<Category>;
    async fn rename(&self, id: CategoryId, name: String) -> anyhow::Result<Option<Category>>;
    async fn delete(&self, id: CategoryId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait TodoItemRepository: Send + Sync + 'static {
    async fn list(&self) -> anyhow::Result<Vec<TodoItem>>;
    async fn list_completed(&self) -> anyhow::Result<Vec<TodoItem>>;
    async fn list_pending(&self) -> anyhow::Result<Vec<TodoItem>>;
    async fn list_by_category(&self, category_id: CategoryId) -> anyhow::Result<Vec<TodoItem>>;
    /// Items with a due date on or before `date`; undated items never match.
    async fn list_due_before(&self, date: DateTime<Utc>) -> anyhow::Result<Vec<TodoItem>>;
    async fn get(&self, id: TodoItemId) -> anyhow::Result<Option<TodoItem>>;
    async fn create(&self, input: NewTodoItem) -> anyhow::Result<TodoItem>;
    async fn update(&self, id: TodoItemId, changes: TodoItemChanges) -> anyhow::Result<Option<TodoItem>>;
    async fn delete(&self, id: TodoItemId) -> anyhow::Result<bool>;
    /// Returns `false` when no item has this id.
    async fn mark_completed(&self, id: TodoItemId) -> anyhow::Result<bool>;
}
