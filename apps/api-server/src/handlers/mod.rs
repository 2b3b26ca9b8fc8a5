//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod products;

use actix_web::web;

use crate::middleware::error::{json_config, path_config, query_config};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .route("/login", web::post().to(auth::login))
        // Auth routes
        .service(web::scope("/auth").route("/refresh_token", web::post().to(auth::refresh_token)))
        .service(
            web::scope("/categories")
                .service(
                    web::resource("")
                        .route(web::get().to(categories::find_all))
                        .route(web::post().to(categories::insert)),
                )
                // Registered ahead of "/{id}" so "page" is not taken for an id.
                .route("/page", web::get().to(categories::find_page))
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(categories::find))
                        .route(web::put().to(categories::update))
                        .route(web::delete().to(categories::delete)),
                ),
        )
        .service(
            web::scope("/products")
                .route("", web::get().to(products::search))
                .route("/{id}", web::get().to(products::find)),
        );
}
