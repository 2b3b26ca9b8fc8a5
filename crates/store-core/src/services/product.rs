use std::sync::Arc;

use crate::domain::{Product, ProductFilter};
use crate::error::DomainError;
use crate::paging::{Page, PageRequest};
use crate::ports::ProductRepository;

/// Read-only product catalog queries.
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Product, DomainError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    pub async fn search(
        &self,
        filter: ProductFilter,
        page: u64,
        lines_per_page: u64,
        direction: &str,
        order_by: &str,
    ) -> Result<Page<Product>, DomainError> {
        let request = PageRequest::parse(
            page,
            lines_per_page,
            direction,
            order_by,
            Product::SORTABLE_FIELDS,
        )?;

        tracing::debug!(name = %filter.name, categories = ?filter.category_ids, "Searching products");
        Ok(self.products.search(&filter, &request).await?)
    }
}
