//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use store_core::domain::{Product, ProductFilter, User};
use store_core::error::RepoError;
use store_core::paging::{Page, PageRequest};
use store_core::ports::{CategoryRepository, ProductRepository, UserRepository};
use store_core::services::mask_email;

use super::entity::category::Entity as CategoryEntity;
use super::entity::product::{self, Entity as ProductEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, fetch_page, query_error};

const LIKE_ESCAPE: char = '\\';

/// `%text%` with the LIKE wildcards in `text` matched literally.
fn contains_pattern(text: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL product repository.
pub type PostgresProductRepository = PostgresBaseRepository<ProductEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn count_products(&self, category_id: i32) -> Result<u64, RepoError> {
        ProductEntity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(query_error)
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Product>, RepoError> {
        let result = ProductEntity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search(
        &self,
        filter: &ProductFilter,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepoError> {
        let mut select = ProductEntity::find();

        if !filter.name.is_empty() {
            let pattern = contains_pattern(&filter.name.to_lowercase());
            select = select
                .filter(Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern));
        }
        if !filter.category_ids.is_empty() {
            select = select.filter(product::Column::CategoryId.is_in(filter.category_ids.clone()));
        }

        fetch_page(&self.db, select, request).await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}
