//! Category resource handlers.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use validator::Validate;

use store_core::domain::Category;
use store_shared::dto::{CategoryDetailsResponse, CategoryDto, PageParams};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /categories/{id}
pub async fn find(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let category = state.categories.find_by_id(id).await?;
    let products = state.categories.find_products(id).await?;

    Ok(HttpResponse::Ok().json(CategoryDetailsResponse::new(category, products)))
}

/// POST /categories - Admin only
pub async fn insert(
    _admin: AdminIdentity,
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CategoryDto>,
) -> AppResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate()?;

    let saved = state.categories.insert(Category::from(dto)).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Internal("saved category has no id".to_string()))?;

    let conn = req.connection_info();
    let location = format!("{}://{}{}/{}", conn.scheme(), conn.host(), req.path(), id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// PUT /categories/{id} - Admin only
pub async fn update(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CategoryDto>,
) -> AppResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate()?;

    let category = Category::from(dto).with_id(path.into_inner());
    state.categories.update(category).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /categories/{id} - Admin only
pub async fn delete(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.categories.delete_by_id(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /categories
pub async fn find_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories: Vec<CategoryDto> = state
        .categories
        .find_all()
        .await?
        .into_iter()
        .map(CategoryDto::from)
        .collect();

    Ok(HttpResponse::Ok().json(categories))
}

/// GET /categories/page?page=&linesPerPage=&direction=&orderBy=
pub async fn find_page(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();

    let page = state
        .categories
        .find_page(
            params.page,
            params.lines_per_page,
            &params.direction,
            &params.order_by,
        )
        .await?
        .map(CategoryDto::from);

    Ok(HttpResponse::Ok().json(page))
}
