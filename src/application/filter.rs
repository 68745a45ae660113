use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{category::CategoryId, todo_item::TodoItem};

/// Optional criteria for listing todo items. Every supplied criterion must
/// hold; an empty filter keeps everything.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemFilter {
    pub is_completed: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub due_date_from: Option<DateTime<Utc>>,
    pub due_date_to: Option<DateTime<Utc>>,
    pub search_term: Option<String>,
}

impl TodoItemFilter {
    /// Keeps the items matching every criterion, preserving their order.
    pub fn apply(&self, items: Vec<TodoItem>) -> Vec<TodoItem> {
        let search = self.normalized_search_term();
        items.into_iter().filter(|item| self.matches_with(item, search.as_deref())).collect()
    }

    pub fn matches(&self, item: &TodoItem) -> bool { self.matches_with(item, self.normalized_search_term().as_deref()) }

    fn matches_with(&self, item: &TodoItem, search: Option<&str>) -> bool {
        if let Some(is_completed) = self.is_completed {
            if item.is_completed != is_completed { return false; }
        }
        if let Some(category_id) = self.category_id {
            if item.category_id != Some(category_id) { return false; }
        }
        // A due-date bound never matches an item without a due date.
        if let Some(from) = self.due_date_from {
            if !item.due_date.is_some_and(|due| due >= from) { return false; }
        }
        if let Some(to) = self.due_date_to {
            if !item.due_date.is_some_and(|due| due <= to) { return false; }
        }
        if let Some(term) = search {
            return item.title.to_lowercase().contains(term) || item.description.to_lowercase().contains(term);
        }
        true
    }

    fn normalized_search_term(&self) -> Option<String> {
        self.search_term.as_deref().filter(|t| !t.trim().is_empty()).map(str::to_lowercase)
    }
}
