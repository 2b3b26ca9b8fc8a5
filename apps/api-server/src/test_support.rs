//! Shared fixtures for handler tests.

use std::sync::Arc;

use store_core::domain::{Category, Product, Role, User};
use store_core::ports::{BaseRepository, TokenService};
use store_infra::{
    InMemoryDatabase, InMemoryProductRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

use crate::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@store.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const CLIENT_EMAIL: &str = "maria@gmail.com";

/// Build an actix test service around the routes of a [`TestContext`].
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state.clone()))
                .configure($crate::handlers::configure_routes),
        )
        .await
    };
}

pub struct TestContext {
    pub state: AppState,
    pub db: Arc<InMemoryDatabase>,
    jwt: JwtConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let db = InMemoryDatabase::new();
        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        };

        Self {
            state: AppState::in_memory(db.clone(), jwt.clone()),
            db,
            jwt,
        }
    }

    /// Create the administrator with a real password hash.
    pub async fn seed_admin(&self) {
        self.state
            .auth
            .ensure_admin("Admin", ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
    }

    /// Token for a stored user holding `roles`, signed without a login round trip.
    async fn token_for(&self, name: &str, email: &str, role: Role) -> String {
        let users = InMemoryUserRepository::new(self.db.clone());
        let user = users
            .save(User::new(name.to_string(), email.to_string(), "unused".to_string()).with_role(role))
            .await
            .unwrap();

        JwtTokenService::new(self.jwt.clone())
            .generate_token(&user.email, &user.roles)
            .unwrap()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("Admin", "root@store.com", Role::Admin).await
    }

    pub async fn client_token(&self) -> String {
        self.token_for("Maria Silva", CLIENT_EMAIL, Role::Client).await
    }

    pub async fn seed_category(&self, name: &str) -> i32 {
        let saved = self
            .state
            .categories
            .insert(Category::new(name))
            .await
            .unwrap();
        saved.id.unwrap()
    }

    pub async fn seed_product(&self, name: &str, price: f64, category_id: i32) -> i32 {
        let products = InMemoryProductRepository::new(self.db.clone());
        let saved = products
            .save(Product::new(name, price, category_id))
            .await
            .unwrap();
        saved.id.unwrap()
    }
}
