use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{category_service::CategoryService, response::ApiResponse, todo_item_service::TodoItemService};
use crate::domain::{
    category::{CategoryId, CategoryWithItems},
    todo_item::TodoItem,
};

/// Label for items that reference no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_categories: usize,
    pub total_todo_items: usize,
    pub categories: Vec<CategoryStatsEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatsEntry {
    pub category_id: CategoryId,
    pub category_name: String,
    pub todo_items_count: usize,
    pub completed_items: usize,
    pub pending_items: usize,
}

impl CategoryStats {
    /// Entries are ordered by item count, largest first; ties keep store order.
    pub fn compute(categories: &[CategoryWithItems]) -> Self {
        let mut entries: Vec<CategoryStatsEntry> = categories
            .iter()
            .map(|c| {
                let total = c.item_count();
                let completed = c.completed_count();
                CategoryStatsEntry {
                    category_id: c.category.id,
                    category_name: c.category.name.clone(),
                    todo_items_count: total,
                    completed_items: completed,
                    pending_items: total - completed,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.todo_items_count.cmp(&a.todo_items_count));

        Self {
            total_categories: entries.len(),
            total_todo_items: entries.iter().map(|e| e.todo_items_count).sum(),
            categories: entries,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub completion_rate: f64,
    pub tasks_by_category: Vec<CategoryBreakdown>,
    pub overdue_tasks: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: usize,
    pub completed: usize,
}

impl TodoStats {
    /// `completed` and `pending` come from the store's status queries; `items`
    /// drives the per-category breakdown and the overdue count.
    pub fn compute(items: &[TodoItem], completed: usize, pending: usize, now: DateTime<Utc>) -> Self {
        let total = items.len();
        let completion_rate = if total > 0 { completed as f64 / total as f64 * 100.0 } else { 0.0 };

        // `None` stays apart from a real category named "Uncategorized".
        // First-seen order keeps the stable sort below deterministic.
        let mut groups: Vec<(Option<&str>, usize, usize)> = Vec::new();
        let mut index: HashMap<Option<&str>, usize> = HashMap::new();
        for item in items {
            let key = item.category_name.as_deref();
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((key, 0, 0));
                groups.len() - 1
            });
            groups[slot].1 += 1;
            if item.is_completed { groups[slot].2 += 1; }
        }
        groups.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total_tasks: total,
            completed_tasks: completed,
            pending_tasks: pending,
            completion_rate,
            tasks_by_category: groups
                .into_iter()
                .map(|(name, count, completed)| CategoryBreakdown {
                    category: name.unwrap_or(UNCATEGORIZED).to_string(),
                    count,
                    completed,
                })
                .collect(),
            overdue_tasks: items.iter().filter(|i| i.is_overdue(now)).count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub category_stats: Option<CategoryStats>,
    pub todo_stats: Option<TodoStats>,
}

/// Combines the category and todo item statistics into a single envelope.
pub async fn overall_stats<C, T>(categories: &C, todo_items: &T) -> Result<ApiResponse<OverallStats>>
where
    C: CategoryService,
    T: TodoItemService,
{
    let category_stats = categories.stats().await?;
    let todo_stats = todo_items.stats().await?;
    Ok(ApiResponse::ok_with_message(
        OverallStats { category_stats: category_stats.data, todo_stats: todo_stats.data },
        "Overall statistics",
    ))
}
