use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Statement, Value};

use store_core::domain::{Category, ProductFilter, Role, User};
use store_core::error::RepoError;
use store_core::paging::PageRequest;
use store_core::ports::{BaseRepository, CategoryRepository, ProductRepository, UserRepository};

use crate::database::entity::{category, product, user};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresProductRepository, PostgresUserRepository,
};

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

#[tokio::test]
async fn test_find_category_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category::Model {
            id: 1,
            name: "Informática".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let result: Option<Category> = repo.find_by_id(1).await.unwrap();

    let category = result.unwrap();
    assert_eq!(category.id, Some(1));
    assert_eq!(category.name, "Informática");
}

#[tokio::test]
async fn test_find_category_page() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(3)]])
        .append_query_results([vec![
            category::Model {
                id: 2,
                name: "Eletrônicos".to_owned(),
            },
            category::Model {
                id: 1,
                name: "Informática".to_owned(),
            },
        ]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let request = PageRequest::parse(0, 2, "ASC", "name", Category::SORTABLE_FIELDS).unwrap();

    let page = BaseRepository::<Category, i32>::find_page(&repo, &request)
        .await
        .unwrap();

    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content[0].name, "Eletrônicos");
    assert_eq!(page.content[1].name, "Informática");
}

fn logged_statements(db: DatabaseConnection) -> Vec<Statement> {
    db.into_transaction_log()
        .iter()
        .flat_map(|t| t.statements().to_vec())
        .collect()
}

#[tokio::test]
async fn test_page_order_breaks_ties_on_primary_key() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)]])
        .append_query_results([Vec::<category::Model>::new()])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db.clone());
    let request = PageRequest::parse(0, 2, "DESC", "name", Category::SORTABLE_FIELDS).unwrap();
    BaseRepository::<Category, i32>::find_page(&repo, &request)
        .await
        .unwrap();

    let statements = logged_statements(db);
    assert!(
        statements.iter().any(|s| s
            .sql
            .contains(r#"ORDER BY "categories"."name" DESC, "categories"."id" ASC"#)),
        "{statements:?}"
    );
}

#[tokio::test]
async fn test_search_matches_wildcards_literally() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(1)]])
        .append_query_results([vec![product::Model {
            id: 1,
            name: "Cupom 50%_off".to_owned(),
            price: 10.0,
            category_id: 1,
        }]])
        .into_connection();

    let repo = PostgresProductRepository::new(db.clone());
    let filter = ProductFilter {
        name: "50%_OFF".to_string(),
        category_ids: vec![],
    };
    let request = PageRequest::parse(0, 24, "ASC", "name", &["name"]).unwrap();

    let page = repo.search(&filter, &request).await.unwrap();
    assert_eq!(page.content.len(), 1);

    let statements = logged_statements(db);
    let escaped = Value::from(r"%50\%\_off%");
    assert!(statements.iter().any(|s| s.sql.contains("ESCAPE")));
    assert!(
        statements
            .iter()
            .filter_map(|s| s.values.as_ref())
            .any(|values| values.0.contains(&escaped)),
        "{statements:?}"
    );
}

#[tokio::test]
async fn test_count_products() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(2)]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    assert_eq!(repo.count_products(1).await.unwrap(), 2);
}

#[tokio::test]
async fn test_delete_missing_category() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let result = BaseRepository::<Category, i32>::delete(&repo, 9).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_user_by_email_parses_roles() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: 1,
            name: "Admin".to_owned(),
            email: "admin@store.com".to_owned(),
            password_hash: "hash".to_owned(),
            roles: "ADMIN,CLIENT".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user: User = repo.find_by_email("admin@store.com").await.unwrap().unwrap();
    assert_eq!(user.roles, vec![Role::Admin, Role::Client]);
}
