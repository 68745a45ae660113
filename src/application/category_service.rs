use anyhow::Result;
use async_trait::async_trait;

use super::{
    dto::{CategoryDto, CategoryWithItemsDto, CreateCategoryDto, UpdateCategoryDto},
    mapping::category_dto,
    response::{ApiCollectionResponse, ApiResponse, FailureKind},
    stats::CategoryStats,
};
use crate::domain::{category::CategoryId, repository::CategoryRepository};

#[async_trait]
pub trait CategoryService: Send + Sync + 'static {
    async fn list(&self) -> Result<ApiCollectionResponse<CategoryDto>>;
    async fn get(&self, id: CategoryId) -> Result<ApiResponse<CategoryWithItemsDto>>;
    async fn create(&self, input: CreateCategoryDto) -> Result<ApiResponse<CategoryDto>>;
    async fn update(&self, id: CategoryId, input: UpdateCategoryDto) -> Result<ApiResponse<CategoryDto>>;
    async fn delete(&self, id: CategoryId) -> Result<ApiResponse<bool>>;
    async fn stats(&self) -> Result<ApiResponse<CategoryStats>>;
}

#[derive(Clone)]
pub struct CategoryServiceImpl<C: CategoryRepository> {
    categories: C,
}

impl<C: CategoryRepository> CategoryServiceImpl<C> {
    pub fn new(categories: C) -> Self { Self { categories } }
}

fn not_found<T>(id: CategoryId) -> ApiResponse<T> {
    ApiResponse::fail(FailureKind::NotFound, format!("Category with ID {id} not found"))
}

fn name_taken<T>(name: &str) -> ApiResponse<T> {
    ApiResponse::fail(FailureKind::Conflict, format!("Category with name '{name}' already exists"))
}

#[async_trait]
impl<C: CategoryRepository> CategoryService for CategoryServiceImpl<C> {
    #[tracing::instrument(skip(self), err)]
    async fn list(&self) -> Result<ApiCollectionResponse<CategoryDto>> {
        let categories = self.categories.list_with_items().await?;
        Ok(ApiCollectionResponse::ok(categories.into_iter().map(CategoryDto::from).collect()))
    }

    #[tracing::instrument(skip(self), err)]
    async fn get(&self, id: CategoryId) -> Result<ApiResponse<CategoryWithItemsDto>> {
        match self.categories.get_with_items(id).await? {
            Some(category) => Ok(ApiResponse::ok(category.into())),
            None => Ok(not_found(id)),
        }
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name), err)]
    async fn create(&self, input: CreateCategoryDto) -> Result<ApiResponse<CategoryDto>> {
        if self.categories.get_by_name(&input.name).await?.is_some() {
            return Ok(name_taken(&input.name));
        }

        let created = self.categories.create(input.into()).await?;
        tracing::info!(category_id = created.id.0, "category created");
        Ok(ApiResponse::ok_with_message(category_dto(created, 0), "Category created successfully"))
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name), err)]
    async fn update(&self, id: CategoryId, input: UpdateCategoryDto) -> Result<ApiResponse<CategoryDto>> {
        let Some(current) = self.categories.get_with_items(id).await? else { return Ok(not_found(id)) };

        if current.category.name != input.name {
            if let Some(other) = self.categories.get_by_name(&input.name).await? {
                if other.id != id { return Ok(name_taken(&input.name)); }
            }
        }

        let Some(renamed) = self.categories.rename(id, input.name).await? else { return Ok(not_found(id)) };
        tracing::info!(category_id = id.0, "category updated");
        Ok(ApiResponse::ok_with_message(category_dto(renamed, current.item_count()), "Category updated successfully"))
    }

    #[tracing::instrument(skip(self), err)]
    async fn delete(&self, id: CategoryId) -> Result<ApiResponse<bool>> {
        let Some(current) = self.categories.get_with_items(id).await? else { return Ok(not_found(id)) };

        if !current.items.is_empty() {
            return Ok(ApiResponse::fail(
                FailureKind::Conflict,
                format!("Cannot delete category with ID {id} because it has {} todo item(s) assigned", current.item_count()),
            ));
        }

        if !self.categories.delete(id).await? {
            return Ok(ApiResponse::fail(FailureKind::Failed, format!("Could not delete category with ID {id}")));
        }
        tracing::info!(category_id = id.0, "category deleted");
        Ok(ApiResponse::ok_with_message(true, "Category deleted successfully"))
    }

    #[tracing::instrument(skip(self), err)]
    async fn stats(&self) -> Result<ApiResponse<CategoryStats>> {
        let categories = self.categories.list_with_items().await?;
        Ok(ApiResponse::ok_with_message(CategoryStats::compute(&categories), "Category statistics"))
    }
}
