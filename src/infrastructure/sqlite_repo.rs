use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::domain::{
    category::{Category, CategoryId, CategoryWithItems, NewCategory},
    repository::{CategoryRepository, TodoItemRepository},
    todo_item::{NewTodoItem, TodoItem, TodoItemChanges, TodoItemId},
};

const SELECT_TODO_ITEMS: &str = "SELECT t.id, t.title, t.description, t.is_completed, t.created_at, t.due_date, t.category_id,
        c.name AS category_name
     FROM todo_items t
     LEFT JOIN categories c ON c.id = t.category_id";

#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }

    async fn items_of(&self, id: CategoryId) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query(&format!("{SELECT_TODO_ITEMS} WHERE t.category_id = ?1 ORDER BY t.id"))
            .bind(id.0)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(row_to_todo_item).collect()
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn list_with_items(&self) -> Result<Vec<CategoryWithItems>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let categories = rows.into_iter().map(row_to_category).collect::<Result<Vec<_>>>()?;

        let item_rows = sqlx::query(&format!("{SELECT_TODO_ITEMS} WHERE t.category_id IS NOT NULL ORDER BY t.id"))
            .fetch_all(&self.pool)
            .await?;
        let mut by_category: HashMap<CategoryId, Vec<TodoItem>> = HashMap::new();
        for row in item_rows {
            let item = row_to_todo_item(row)?;
            if let Some(category_id) = item.category_id {
                by_category.entry(category_id).or_default().push(item);
            }
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let items = by_category.remove(&category.id).unwrap_or_default();
                CategoryWithItems { category, items }
            })
            .collect())
    }

    async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_category).transpose()
    }

    async fn get_with_items(&self, id: CategoryId) -> Result<Option<CategoryWithItems>> {
        let Some(category) = self.get(id).await? else { return Ok(None) };
        let items = self.items_of(id).await?;
        Ok(Some(CategoryWithItems { category, items }))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        // `=` on TEXT uses the BINARY collation, so this is case-sensitive.
        let row = sqlx::query("SELECT id, name FROM categories WHERE name = ?1 ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_category).transpose()
    }

    async fn create(&self, input: NewCategory) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(&input.name)
            .execute(&self.pool)
            .await?;
        Ok(Category { id: CategoryId(result.last_insert_rowid()), name: input.name })
    }

    async fn rename(&self, id: CategoryId, name: String) -> Result<Option<Category>> {
        let result = sqlx::query("UPDATE categories SET name = ?2 WHERE id = ?1")
            .bind(id.0)
            .bind(&name)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 { return Ok(None); }
        Ok(Some(Category { id, name }))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct SqliteTodoItemRepository {
    pool: SqlitePool,
}

impl SqliteTodoItemRepository {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }

    async fn list_where(&self, condition: &str, param: Option<String>) -> Result<Vec<TodoItem>> {
        let sql = format!("{SELECT_TODO_ITEMS} WHERE {condition} ORDER BY t.id");
        let mut query = sqlx::query(&sql);
        if let Some(param) = param {
            query = query.bind(param);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_todo_item).collect()
    }
}

#[async_trait]
impl TodoItemRepository for SqliteTodoItemRepository {
    async fn list(&self) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query(&format!("{SELECT_TODO_ITEMS} ORDER BY t.id"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(row_to_todo_item).collect()
    }

    async fn list_completed(&self) -> Result<Vec<TodoItem>> { self.list_where("t.is_completed = 1", None).await }

    async fn list_pending(&self) -> Result<Vec<TodoItem>> { self.list_where("t.is_completed = 0", None).await }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query(&format!("{SELECT_TODO_ITEMS} WHERE t.category_id = ?1 ORDER BY t.id"))
            .bind(category_id.0)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(row_to_todo_item).collect()
    }

    async fn list_due_before(&self, date: DateTime<Utc>) -> Result<Vec<TodoItem>> {
        self.list_where("t.due_date IS NOT NULL AND t.due_date <= ?1", Some(to_db_timestamp(date))).await
    }

    async fn get(&self, id: TodoItemId) -> Result<Option<TodoItem>> {
        let row = sqlx::query(&format!("{SELECT_TODO_ITEMS} WHERE t.id = ?1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_todo_item).transpose()
    }

    async fn create(&self, input: NewTodoItem) -> Result<TodoItem> {
        let result = sqlx::query(
            "INSERT INTO todo_items (title, description, is_completed, created_at, due_date, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.is_completed)
        .bind(to_db_timestamp(input.created_at))
        .bind(input.due_date.map(to_db_timestamp))
        .bind(input.category_id.map(|c| c.0))
        .execute(&self.pool)
        .await?;

        let id = TodoItemId(result.last_insert_rowid());
        self.get(id).await?.with_context(|| format!("todo item {id} missing right after insert"))
    }

    async fn update(&self, id: TodoItemId, changes: TodoItemChanges) -> Result<Option<TodoItem>> {
        let result = sqlx::query(
            "UPDATE todo_items
             SET title = ?2, description = ?3, is_completed = ?4, due_date = ?5, category_id = ?6
             WHERE id = ?1",
        )
        .bind(id.0)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.is_completed)
        .bind(changes.due_date.map(to_db_timestamp))
        .bind(changes.category_id.map(|c| c.0))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 { return Ok(None); }
        self.get(id).await
    }

    async fn delete(&self, id: TodoItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_completed(&self, id: TodoItemId) -> Result<bool> {
        let result = sqlx::query("UPDATE todo_items SET is_completed = 1 WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_category(row: SqliteRow) -> Result<Category> {
    Ok(Category { id: CategoryId(row.try_get("id")?), name: row.try_get("name")? })
}

fn row_to_todo_item(row: SqliteRow) -> Result<TodoItem> {
    let created_at: String = row.try_get("created_at")?;
    let due_date: Option<String> = row.try_get("due_date")?;
    let category_id: Option<i64> = row.try_get("category_id")?;

    Ok(TodoItem {
        id: TodoItemId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        is_completed: row.try_get("is_completed")?,
        created_at: parse_timestamp(&created_at)?,
        due_date: due_date.as_deref().map(parse_timestamp).transpose()?,
        category_id: category_id.map(CategoryId),
        category_name: row.try_get("category_name")?,
    })
}

/// Fixed-width UTC form, so text comparison in SQL orders chronologically.
fn to_db_timestamp(value: DateTime<Utc>) -> String { value.to_rfc3339_opts(SecondsFormat::Nanos, true) }

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value).with_context(|| format!("invalid timestamp `{value}`"))?;
    Ok(parsed.with_timezone(&Utc))
}
