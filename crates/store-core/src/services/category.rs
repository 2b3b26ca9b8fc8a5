use std::sync::Arc;

use crate::domain::{Category, Product};
use crate::error::{DomainError, RepoError};
use crate::paging::{Page, PageRequest};
use crate::ports::{CategoryRepository, ProductRepository};

const ENTITY: &str = "Category";

/// Category use cases.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Category, DomainError> {
        tracing::debug!(category_id = id, "Finding category");

        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Products owned by an existing category.
    pub async fn find_products(&self, id: i32) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.find_by_category(id).await?)
    }

    /// Persist a new category. Any identity on the input is discarded.
    pub async fn insert(&self, mut category: Category) -> Result<Category, DomainError> {
        category.id = None;
        let saved = self.categories.save(category).await?;

        tracing::info!(category_id = ?saved.id, name = %saved.name, "Category created");
        Ok(saved)
    }

    /// Overwrite the category named by `category.id`.
    pub async fn update(&self, category: Category) -> Result<Category, DomainError> {
        let id = category
            .id
            .ok_or_else(|| DomainError::Validation("category id is required".to_string()))?;

        let mut existing = self.find_by_id(id).await?;
        existing.name = category.name;

        let saved = match self.categories.save(existing).await {
            Err(RepoError::NotFound) => return Err(DomainError::not_found(ENTITY, id)),
            other => other?,
        };

        tracing::info!(category_id = id, name = %saved.name, "Category updated");
        Ok(saved)
    }

    /// Delete a category that owns no products.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        self.find_by_id(id).await?;

        if self.categories.count_products(id).await? > 0 {
            return Err(DomainError::Integrity(
                "cannot delete a category that has products".to_string(),
            ));
        }

        match self.categories.delete(id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => return Err(DomainError::not_found(ENTITY, id)),
            // A product may have been attached after the count above.
            Err(RepoError::Constraint(_)) => {
                return Err(DomainError::Integrity(
                    "cannot delete a category that has products".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn find_page(
        &self,
        page: u64,
        lines_per_page: u64,
        direction: &str,
        order_by: &str,
    ) -> Result<Page<Category>, DomainError> {
        let request = PageRequest::parse(
            page,
            lines_per_page,
            direction,
            order_by,
            Category::SORTABLE_FIELDS,
        )?;

        Ok(self.categories.find_page(&request).await?)
    }
}
