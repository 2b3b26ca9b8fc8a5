use async_trait::async_trait;

use crate::domain::{Category, Product, ProductFilter, User};
use crate::error::RepoError;
use crate::paging::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// One page of entities ordered as the request asks.
    async fn find_page(&self, request: &PageRequest) -> Result<Page<T>, RepoError>;

    /// Save an entity (create when it has no ID, update otherwise).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    /// Number of products owned by the category.
    async fn count_products(&self, category_id: i32) -> Result<u64, RepoError>;
}

/// Product repository.
#[async_trait]
pub trait ProductRepository: BaseRepository<Product, i32> {
    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Product>, RepoError>;

    async fn search(
        &self,
        filter: &ProductFilter,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
