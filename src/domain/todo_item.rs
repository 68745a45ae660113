use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoItemId(pub i64);

impl std::fmt::Display for TodoItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

/// A stored todo item as read back from the store.
///
/// `category_id` is a weak reference: the store nulls it when the category
/// is deleted. `category_name` is resolved by join at read time and is never
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoItemId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
}

impl TodoItem {
    /// Due strictly before `now` and still pending.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < now)
    }
}

#[derive(Debug, Clone)]
pub struct NewTodoItem {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
}

/// Wholesale replacement of an item's mutable fields; `created_at` stays
/// as it was at creation.
#[derive(Debug, Clone)]
pub struct TodoItemChanges {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
}
