use std::sync::Arc;

use store_core::DomainError;
use store_core::domain::{Principal, Role, User};
use store_core::ports::{BaseRepository, PasswordService};
use store_core::services::AuthService;
use store_infra::{
    Argon2PasswordService, InMemoryDatabase, InMemoryUserRepository, JwtConfig, JwtTokenService,
};

struct Fixture {
    service: AuthService,
    users: Arc<InMemoryUserRepository>,
}

async fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new(InMemoryDatabase::new()));
    let passwords = Arc::new(Argon2PasswordService::new());
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "auth-service-test".to_string(),
        ..JwtConfig::default()
    }));

    let hash = passwords.hash("123").unwrap();
    users
        .save(User::new(
            "Maria Silva".to_string(),
            "maria@gmail.com".to_string(),
            hash,
        ))
        .await
        .unwrap();

    Fixture {
        service: AuthService::new(users.clone(), tokens, passwords),
        users,
    }
}

#[tokio::test]
async fn login_issues_token_for_email() {
    let fixture = fixture().await;

    let token = fixture.service.login("maria@gmail.com", "123").await.unwrap();
    let principal = fixture.service.authenticate(&token).unwrap();

    assert_eq!(principal.username, "maria@gmail.com");
    assert_eq!(principal.roles, vec![Role::Client]);
}

#[tokio::test]
async fn login_with_wrong_password_or_unknown_email_fails() {
    let fixture = fixture().await;

    assert!(matches!(
        fixture.service.login("maria@gmail.com", "wrong").await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        fixture.service.login("nobody@gmail.com", "123").await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn refresh_returns_distinct_valid_tokens() {
    let fixture = fixture().await;
    let principal = Principal {
        username: "maria@gmail.com".to_string(),
        roles: vec![Role::Client],
    };

    let first = fixture.service.refresh_token(&principal).await.unwrap();
    let second = fixture.service.refresh_token(&principal).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(fixture.service.authenticate(&first).unwrap(), principal);
    assert_eq!(fixture.service.authenticate(&second).unwrap(), principal);
}

#[tokio::test]
async fn refresh_for_deleted_user_is_unauthorized() {
    let fixture = fixture().await;
    let principal = Principal {
        username: "ghost@gmail.com".to_string(),
        roles: vec![Role::Admin],
    };

    assert!(matches!(
        fixture.service.refresh_token(&principal).await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn ensure_admin_is_idempotent() {
    let fixture = fixture().await;

    let admin = fixture
        .service
        .ensure_admin("Admin", "admin@store.com", "secret")
        .await
        .unwrap();
    let again = fixture
        .service
        .ensure_admin("Admin", "admin@store.com", "other")
        .await
        .unwrap();

    assert_eq!(admin.id, again.id);
    assert!(admin.roles.contains(&Role::Admin));
    assert_eq!(fixture.users.find_all().await.unwrap().len(), 2);

    let token = fixture.service.login("admin@store.com", "secret").await.unwrap();
    assert!(
        fixture
            .service
            .authenticate(&token)
            .unwrap()
            .has_role(Role::Admin)
    );
}
