//! Shelf Mock - development backend for the catalog back-office
//!
//! Serves a JSON-file catalog with json-server-compatible query
//! parameters plus a login endpoint. Also consumed as a library by the
//! client integration tests, which mount [`app`] on an ephemeral port.

pub mod api;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the mock backend router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/login", post(api::login))
        .route("/categories", get(api::list_categories))
        .route("/products", get(api::list_products).post(api::create_product))
        .route(
            "/products/{id}",
            get(api::get_product).put(api::update_product),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
