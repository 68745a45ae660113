use serde::{Deserialize, Serialize};

use super::todo_item::TodoItem;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A category together with every item currently referencing it.
///
/// Items are loaded eagerly by the repository; a `Category` on its own
/// never carries them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWithItems {
    pub category: Category,
    pub items: Vec<TodoItem>,
}

impl CategoryWithItems {
    pub fn item_count(&self) -> usize { self.items.len() }

    pub fn completed_count(&self) -> usize { self.items.iter().filter(|i| i.is_completed).count() }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}
