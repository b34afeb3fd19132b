//! Mock API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use shared::models::validate_attributes;
use shared::{
    AppError, AppResult, Category, ListFilter, LoginRequest, LoginResponse, Product,
    ProductCreate, ProductUpdate, SortConfig, SortDirection, User, query,
};

use crate::state::AppState;

const DEMO_EMAIL: &str = "demo@home24.de";
const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: usize,
}

/// POST /api/login - demo credentials only
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if req.email != DEMO_EMAIL || req.password != DEMO_PASSWORD {
        return Err(AppError::validation("Invalid email or password"));
    }

    let user = User {
        id: "1".to_string(),
        email: DEMO_EMAIL.to_string(),
        name: "Demo User".to_string(),
    };

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .map(|t| t.timestamp())
        .ok_or_else(|| AppError::internal("Clock overflow"))?;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(e.to_string()))?;

    Ok(Json(LoginResponse { user, token }))
}

/// GET /categories - full flat list
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    let catalog = state.catalog.read().await;
    Json(catalog.categories.clone())
}

/// Listing query parameters (json-server conventions)
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_page")]
    page: Option<u32>,
    #[serde(rename = "_limit")]
    limit: Option<u32>,
    #[serde(rename = "_sort")]
    sort: Option<String>,
    #[serde(rename = "_order")]
    order: Option<String>,
    category_id: Option<i64>,
}

impl ListParams {
    /// Convert into a pipeline filter; `record_count` sizes the page
    /// when no pagination parameters were supplied.
    fn into_filter(self, record_count: usize) -> ListFilter {
        let page_size = match (self.page, self.limit) {
            (None, None) => record_count as u32,
            (_, limit) => limit.unwrap_or(10),
        };

        ListFilter {
            category_id: self.category_id,
            page: self.page.unwrap_or(1),
            page_size,
            sort: self.sort.filter(|f| !f.is_empty()).map(|field| SortConfig {
                field,
                direction: self
                    .order
                    .as_deref()
                    .and_then(|o| o.parse::<SortDirection>().ok())
                    .unwrap_or_default(),
            }),
        }
    }
}

/// GET /products - filtered, sorted, optionally paginated
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Product>> {
    let catalog = state.catalog.read().await;
    let records = catalog.products.clone();
    let filter = params.into_filter(records.len());
    Json(query::run(records, &filter).items)
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let catalog = state.catalog.read().await;
    catalog
        .products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))
}

/// POST /products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_attributes(&payload.attributes).map_err(AppError::validation)?;

    let mut catalog = state.catalog.write().await;
    let product = Product {
        id: catalog.next_product_id(),
        name: payload.name,
        category_id: payload.category_id,
        attributes: payload.attributes,
        last_modified: payload.last_modified,
    };
    catalog.products.push(product.clone());

    tracing::info!(id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(attributes) = &payload.attributes {
        validate_attributes(attributes).map_err(AppError::validation)?;
    }

    let mut catalog = state.catalog.write().await;
    let product = catalog
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

    product.apply(payload);
    tracing::info!(id, "Product updated");
    Ok(Json(product.clone()))
}
