pub mod categories;
pub mod stats;
pub mod todo_items;
