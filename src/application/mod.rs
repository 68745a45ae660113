pub mod category_service;
pub mod dto;
pub mod filter;
pub mod mapping;
pub mod response;
pub mod stats;
pub mod todo_item_service;
