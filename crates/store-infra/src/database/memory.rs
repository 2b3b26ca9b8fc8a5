//! In-memory store - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use store_core::domain::{Category, Product, ProductFilter, User};
use store_core::error::RepoError;
use store_core::paging::{Direction, Page, PageRequest};
use store_core::ports::{BaseRepository, CategoryRepository, ProductRepository, UserRepository};

/// One table of rows keyed by their generated id.
pub struct Table<T> {
    rows: RwLock<BTreeMap<i32, T>>,
    next_id: AtomicI32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

/// All in-memory tables. Share it between repositories with an `Arc`.
#[derive(Default)]
pub struct InMemoryDatabase {
    categories: Table<Category>,
    products: Table<Product>,
    users: Table<User>,
}

impl InMemoryDatabase {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// A domain type that can live in an in-memory [`Table`].
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<i32>;

    fn set_id(&mut self, id: i32);

    fn table(db: &InMemoryDatabase) -> &Table<Self>;

    /// Compare two rows on a sortable field. Unknown fields compare equal.
    fn compare_by(&self, other: &Self, field: &str) -> Ordering;

    /// Whether storing both rows would break a uniqueness rule.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

impl Record for Category {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(db: &InMemoryDatabase) -> &Table<Self> {
        &db.categories
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.cmp(&other.name),
            _ => Ordering::Equal,
        }
    }
}

impl Record for Product {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(db: &InMemoryDatabase) -> &Table<Self> {
        &db.products
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.cmp(&other.name),
            "price" => self.price.total_cmp(&other.price),
            _ => Ordering::Equal,
        }
    }
}

impl Record for User {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(db: &InMemoryDatabase) -> &Table<Self> {
        &db.users
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.cmp(&other.name),
            _ => Ordering::Equal,
        }
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

/// Sort `rows` as `request` asks and cut out the requested page.
fn paginate<T: Record>(mut rows: Vec<T>, request: &PageRequest) -> Page<T> {
    rows.sort_by(|a, b| {
        let ordering = a.compare_by(b, &request.order_by);
        match request.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });

    let total = rows.len() as u64;
    let content = rows
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.lines_per_page as usize)
        .collect();

    Page::new(content, request, total)
}

/// Generic in-memory repository over one table of a shared [`InMemoryDatabase`].
pub struct InMemoryRepository<T> {
    db: Arc<InMemoryDatabase>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new(db: Arc<InMemoryDatabase>) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    fn table(&self) -> &Table<T> {
        T::table(&self.db)
    }
}

/// In-memory category repository.
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;

/// In-memory product repository.
pub type InMemoryProductRepository = InMemoryRepository<Product>;

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

#[async_trait]
impl<T: Record> BaseRepository<T, i32> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        Ok(self.table().rows.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.table().rows.read().await.values().cloned().collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<T>, RepoError> {
        let rows = self.table().rows.read().await.values().cloned().collect();
        Ok(paginate(rows, request))
    }

    async fn save(&self, mut entity: T) -> Result<T, RepoError> {
        let table = self.table();
        let mut rows = table.rows.write().await;

        if rows
            .values()
            .any(|row| row.id() != entity.id() && row.conflicts_with(&entity))
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        let id = match entity.id() {
            Some(id) if rows.contains_key(&id) => id,
            Some(_) => return Err(RepoError::NotFound),
            None => table.next_id.fetch_add(1, AtomicOrdering::SeqCst),
        };

        entity.set_id(id);
        rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        match self.table().rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn count_products(&self, category_id: i32) -> Result<u64, RepoError> {
        let products = self.db.products.rows.read().await;
        Ok(products
            .values()
            .filter(|p| p.category_id == category_id)
            .count() as u64)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Product>, RepoError> {
        let products = self.table().rows.read().await;
        Ok(products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        filter: &ProductFilter,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepoError> {
        let rows = self
            .table()
            .rows
            .read()
            .await
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        Ok(paginate(rows, request))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.table().rows.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, size: u64, direction: &str, order_by: &str) -> PageRequest {
        PageRequest::parse(page, size, direction, order_by, Product::SORTABLE_FIELDS).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryCategoryRepository::new(InMemoryDatabase::new());

        let first = repo.save(Category::new("Informática")).await.unwrap();
        let second = repo.save(Category::new("Escritório")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_is_not_found() {
        let repo = InMemoryCategoryRepository::new(InMemoryDatabase::new());

        let result = repo.save(Category::new("Ghost").with_id(42)).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_row() {
        let repo = InMemoryCategoryRepository::new(InMemoryDatabase::new());
        assert!(matches!(repo.delete(7).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_count_products_reads_product_table() {
        let db = InMemoryDatabase::new();
        let categories = InMemoryCategoryRepository::new(db.clone());
        let products = InMemoryProductRepository::new(db);

        let category = categories.save(Category::new("Informática")).await.unwrap();
        let id = category.id.unwrap();
        products.save(Product::new("Computador", 2000.0, id)).await.unwrap();
        products.save(Product::new("Mouse", 80.0, id)).await.unwrap();

        assert_eq!(categories.count_products(id).await.unwrap(), 2);
        assert_eq!(categories.count_products(id + 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_sorts_and_pages() {
        let repo = InMemoryProductRepository::new(InMemoryDatabase::new());
        repo.save(Product::new("Mouse", 80.0, 1)).await.unwrap();
        repo.save(Product::new("Computador", 2000.0, 1)).await.unwrap();
        repo.save(Product::new("Impressora", 800.0, 2)).await.unwrap();

        let page = repo
            .search(&ProductFilter::default(), &request(0, 2, "DESC", "price"))
            .await
            .unwrap();
        let names: Vec<_> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Computador", "Impressora"]);
        assert_eq!(page.total_elements, 3);

        let filter = ProductFilter {
            name: "o".to_string(),
            category_ids: vec![1],
        };
        let page = repo.search(&filter, &request(0, 10, "ASC", "name")).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Computador", "Mouse"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new(InMemoryDatabase::new());
        let user = User::new("Ana".into(), "ana@store.com".into(), "hash".into());

        let saved = repo.save(user.clone()).await.unwrap();
        assert!(matches!(
            repo.save(user).await,
            Err(RepoError::Constraint(_))
        ));

        // Updating the same row keeps its own email.
        assert!(repo.save(saved).await.is_ok());
    }
}
