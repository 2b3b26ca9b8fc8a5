//! Application state - shared across all handlers.

use std::sync::Arc;

use store_core::ports::{CategoryRepository, ProductRepository, UserRepository};
use store_core::services::{AuthService, CategoryService, ProductService};
use store_infra::{
    Argon2PasswordService, InMemoryCategoryRepository, InMemoryDatabase,
    InMemoryProductRepository, InMemoryUserRepository, JwtConfig, JwtTokenService,
};

#[cfg(feature = "postgres")]
use store_infra::{
    DatabaseConfig, PostgresCategoryRepository, PostgresProductRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub auth: Arc<AuthService>,
    /// Name of the persistence backend in use.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let connected = match &config.database {
            Some(db_config) => {
                match Self::postgres(db_config, config.run_migrations, &config.jwt).await {
                    Ok(state) => Some(state),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        None
                    }
                }
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                None
            }
        };

        #[cfg(not(feature = "postgres"))]
        let connected: Option<Self> = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            None
        };

        match connected {
            Some(state) => state,
            None => Self::in_memory(InMemoryDatabase::new(), config.jwt.clone()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(
        db_config: &DatabaseConfig,
        run_migrations: bool,
        jwt: &JwtConfig,
    ) -> Result<Self, migration::DbErr> {
        use migration::{Migrator, MigratorTrait};

        let conn = store_infra::database::connect(db_config).await?;

        if run_migrations {
            Migrator::up(&conn, None).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::with_repositories(
            Arc::new(PostgresCategoryRepository::new(conn.clone())),
            Arc::new(PostgresProductRepository::new(conn.clone())),
            Arc::new(PostgresUserRepository::new(conn)),
            jwt.clone(),
            "postgres",
        ))
    }

    /// State backed by the in-memory store.
    pub fn in_memory(db: Arc<InMemoryDatabase>, jwt: JwtConfig) -> Self {
        Self::with_repositories(
            Arc::new(InMemoryCategoryRepository::new(db.clone())),
            Arc::new(InMemoryProductRepository::new(db.clone())),
            Arc::new(InMemoryUserRepository::new(db)),
            jwt,
            "memory",
        )
    }

    pub fn with_repositories(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        jwt: JwtConfig,
        backend: &'static str,
    ) -> Self {
        let tokens = Arc::new(JwtTokenService::new(jwt));
        let passwords = Arc::new(Argon2PasswordService::new());

        tracing::info!(backend, "Application state initialized");

        Self {
            categories: Arc::new(CategoryService::new(categories, products.clone())),
            products: Arc::new(ProductService::new(products)),
            auth: Arc::new(AuthService::new(users, tokens, passwords)),
            backend,
        }
    }
}
