//! REST backend for todo items grouped into categories.

pub mod application;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;

use axum::Router;
use sqlx::SqlitePool;

use application::{category_service::CategoryServiceImpl, todo_item_service::TodoItemServiceImpl};
use config::Environment;
use crate::http::routes::{categories, stats, todo_items};
use infrastructure::sqlite_repo::{SqliteCategoryRepository, SqliteTodoItemRepository};

/// Wires repositories, services and routers on top of an already migrated pool.
pub fn build_app(pool: SqlitePool, environment: Environment) -> Router {
    let category_repo = SqliteCategoryRepository::new(pool.clone());
    let todo_item_repo = SqliteTodoItemRepository::new(pool);

    let category_service = CategoryServiceImpl::new(category_repo.clone());
    let todo_item_service = TodoItemServiceImpl::new(todo_item_repo, category_repo);

    crate::http::routing::app(
        [
            categories::router(categories::AppState { service: category_service.clone() }),
            todo_items::router(todo_items::AppState { service: todo_item_service.clone() }),
            stats::router(stats::AppState { categories: category_service, todo_items: todo_item_service }),
        ],
        environment,
    )
}
