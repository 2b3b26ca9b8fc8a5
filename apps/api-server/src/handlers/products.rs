//! Product resource handlers.

use actix_web::{HttpResponse, web};

use store_core::domain::ProductFilter;
use store_shared::dto::{ProductDto, ProductSearchParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /products/{id}
pub async fn find(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let product = state.products.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductDto::from(product)))
}

/// GET /products?name=&categories=1,3&page=&linesPerPage=&direction=&orderBy=
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<ProductSearchParams>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let filter = ProductFilter {
        category_ids: params.category_ids().map_err(AppError::BadRequest)?,
        name: params.name,
    };

    let page = state
        .products
        .search(
            filter,
            params.page,
            params.lines_per_page,
            &params.direction,
            &params.order_by,
        )
        .await?
        .map(ProductDto::from);

    Ok(HttpResponse::Ok().json(page))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    use crate::test_app;
    use crate::test_support::TestContext;

    async fn seeded() -> (TestContext, i32, i32) {
        let ctx = TestContext::new();
        let computing = ctx.seed_category("Informática").await;
        let office = ctx.seed_category("Escritório").await;
        ctx.seed_product("Computador", 2000.0, computing).await;
        ctx.seed_product("Impressora", 800.0, computing).await;
        ctx.seed_product("Mouse", 80.0, computing).await;
        ctx.seed_product("Mesa de escritório", 300.0, office).await;
        (ctx, computing, office)
    }

    #[actix_rt::test]
    async fn test_find_product() {
        let (ctx, _, _) = seeded().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::get().uri("/products/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Computador");
        assert_eq!(body["price"], 2000.0);

        let req = test::TestRequest::get().uri("/products/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_search_by_name_and_category() {
        let (ctx, _, office) = seeded().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/products?name=MESA")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["totalElements"], 1);
        assert_eq!(body["content"][0]["name"], "Mesa de escritório");

        let req = test::TestRequest::get()
            .uri(&format!("/products?categories={office}&orderBy=price"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["totalElements"], 1);
    }

    #[actix_rt::test]
    async fn test_search_orders_and_pages() {
        let (ctx, computing, _) = seeded().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::get()
            .uri(&format!(
                "/products?categories={computing}&orderBy=price&direction=DESC&linesPerPage=2&page=1"
            ))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalElements"], 3);
        assert_eq!(body["number"], 1);
        assert_eq!(body["last"], true);
        assert_eq!(body["content"][0]["name"], "Mouse");
    }

    #[actix_rt::test]
    async fn test_search_rejects_bad_params() {
        let (ctx, _, _) = seeded().await;
        let app = test_app!(ctx);

        for query in [
            "categories=1,abc",
            "orderBy=category",
            "direction=sideways",
            "page=18446744073709551615",
        ] {
            let req = test::TestRequest::get()
                .uri(&format!("/products?{query}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "query {query}");
        }
    }
}
