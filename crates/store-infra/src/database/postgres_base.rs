use std::marker::PhantomData;
use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, Iterable,
    Order, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder, Select, TryIntoModel,
};

use store_core::error::RepoError;
use store_core::paging::{Direction, Page, PageRequest};
use store_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

pub(crate) fn query_error(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Classify write failures so callers can tell constraint hits from outages.
pub(crate) fn write_error(e: DbErr) -> RepoError {
    match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => RepoError::NotFound,
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else if err_str.contains("foreign key") {
                RepoError::Constraint("Entity is referenced by other records".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

/// Run `select` as one page of `request`, ordered by the requested column.
pub(crate) async fn fetch_page<E, T>(
    db: &DbConn,
    select: Select<E>,
    request: &PageRequest,
) -> Result<Page<T>, RepoError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    E::Column: FromStr,
    T: From<E::Model>,
{
    let column = E::Column::from_str(&request.order_by)
        .map_err(|_| RepoError::Query(format!("unknown sort column '{}'", request.order_by)))?;
    let order = match request.direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    };

    // Primary key breaks ties so rows do not move between pages.
    let select = E::PrimaryKey::iter().fold(select.order_by(column, order), |select, key| {
        select.order_by_asc(key.into_column())
    });
    let paginator = select.paginate(db, request.lines_per_page);

    let totals = paginator.num_items_and_pages().await.map_err(query_error)?;
    let models = paginator
        .fetch_page(request.page)
        .await
        .map_err(query_error)?;

    Ok(Page::new(
        models.into_iter().map(Into::into).collect(),
        request,
        totals.number_of_items,
    ))
}

/// `SELECT` over the whole table ordered by primary key.
pub(crate) fn find_ordered<E>() -> Select<E>
where
    E: EntityTrait,
{
    E::PrimaryKey::iter().fold(E::find(), |select, key| {
        select.order_by_asc(key.into_column())
    })
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel:
        ActiveModelTrait<Entity = E> + ActiveModelBehavior + TryIntoModel<E::Model> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    E::Column: FromStr,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let result = find_ordered::<E>()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<T>, RepoError> {
        fetch_page(&self.db, E::find(), request).await
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        // An unset primary key inserts, a set one updates.
        let active_model: E::ActiveModel = entity.into();
        let result = active_model.save(&self.db).await.map_err(write_error)?;

        let model = result.try_into_model().map_err(query_error)?;
        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
