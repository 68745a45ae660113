use chrono::{DateTime, Utc};

use super::dto::{CategoryDto, CategoryWithItemsDto, CreateCategoryDto, CreateTodoItemDto, TodoItemDto, UpdateTodoItemDto};
use crate::domain::{
    category::{Category, CategoryWithItems, NewCategory},
    todo_item::{NewTodoItem, TodoItem, TodoItemChanges},
};

impl From<TodoItem> for TodoItemDto {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            is_completed: item.is_completed,
            created_at: item.created_at,
            due_date: item.due_date,
            category_id: item.category_id,
            category_name: item.category_name,
        }
    }
}

pub fn category_dto(category: Category, todo_items_count: usize) -> CategoryDto {
    CategoryDto { id: category.id, name: category.name, todo_items_count }
}

impl From<CategoryWithItems> for CategoryDto {
    fn from(value: CategoryWithItems) -> Self {
        let count = value.item_count();
        category_dto(value.category, count)
    }
}

impl From<CategoryWithItems> for CategoryWithItemsDto {
    fn from(value: CategoryWithItems) -> Self {
        Self {
            id: value.category.id,
            name: value.category.name,
            todo_items: value.items.into_iter().map(TodoItemDto::from).collect(),
        }
    }
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self { Self { name: dto.name } }
}

/// New items always start pending and are stamped with the server clock.
pub fn new_todo_item(dto: CreateTodoItemDto, now: DateTime<Utc>) -> NewTodoItem {
    NewTodoItem {
        title: dto.title,
        description: dto.description,
        is_completed: false,
        created_at: now,
        due_date: dto.due_date,
        category_id: dto.category_id,
    }
}

impl From<UpdateTodoItemDto> for TodoItemChanges {
    fn from(dto: UpdateTodoItemDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            is_completed: dto.is_completed,
            due_date: dto.due_date,
            category_id: dto.category_id,
        }
    }
}
