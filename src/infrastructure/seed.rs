use anyhow::Result;
use chrono::{Duration, Utc};

use crate::domain::{
    category::NewCategory,
    repository::{CategoryRepository, TodoItemRepository},
    todo_item::NewTodoItem,
};

const CATEGORY_NAMES: [&str; 5] = ["Work", "Home", "Study", "Health", "Entertainment"];

/// Inserts a starter set of categories and items when the store has no
/// categories yet. Returns whether anything was written.
pub async fn seed_if_empty<C, T>(categories: &C, todo_items: &T) -> Result<bool>
where
    C: CategoryRepository,
    T: TodoItemRepository,
{
    if !categories.list_with_items().await?.is_empty() {
        tracing::debug!("store already has categories, skipping seed");
        return Ok(false);
    }

    let mut ids = Vec::with_capacity(CATEGORY_NAMES.len());
    for name in CATEGORY_NAMES {
        let created = categories.create(NewCategory { name: name.to_string() }).await?;
        ids.push(created.id);
    }

    let now = Utc::now();
    let items = [
        ("Write report", "Prepare the quarterly report", ids[0], false, Some(now + Duration::days(2))),
        ("Buy groceries", "Milk, bread, eggs", ids[1], true, None),
        ("Do homework", "Maths, pages 45-50", ids[2], false, Some(now + Duration::days(1))),
        ("Go for a run", "30 minutes of running", ids[3], false, Some(now + Duration::days(3))),
        ("Watch a movie", "The new Marvel movie", ids[4], false, None),
    ];
    for (title, description, category_id, is_completed, due_date) in items {
        todo_items
            .create(NewTodoItem {
                title: title.to_string(),
                description: description.to_string(),
                is_completed,
                created_at: now,
                due_date,
                category_id: Some(category_id),
            })
            .await?;
    }

    tracing::info!(categories = ids.len(), "seeded sample data");
    Ok(true)
}
