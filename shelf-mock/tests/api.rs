//! Handler tests driving the router directly with tower

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use shared::{ErrorBody, LoginResponse, Product};
use shelf_mock::state::{AppState, Catalog};

fn demo_app() -> Router {
    shelf_mock::app(Arc::new(AppState::new(Catalog::demo())))
}

async fn body_json<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_products_filters_by_category() {
    let response = demo_app()
        .oneshot(
            Request::builder()
                .uri("/products?category_id=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert!(products.iter().all(|p| p.category_id == 2));
}

#[tokio::test]
async fn test_list_products_sorts_and_paginates() {
    let response = demo_app()
        .oneshot(
            Request::builder()
                .uri("/products?_sort=name&_order=desc&_page=1&_limit=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let products: Vec<Product> = body_json(response.into_body()).await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Oak Dining Table");
    assert_eq!(products[1].name, "Floor Lamp Aurora");
}

#[tokio::test]
async fn test_list_products_without_pagination_returns_all() {
    let response = demo_app()
        .oneshot(Request::builder().uri("/products").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let products: Vec<Product> = body_json(response.into_body()).await;
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn test_unknown_product_is_404_with_id_in_message() {
    let response = demo_app()
        .oneshot(
            Request::builder()
                .uri("/products/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = body_json(response.into_body()).await;
    assert!(error.message.contains("999"));
}

#[tokio::test]
async fn test_login_demo_credentials() {
    let response = demo_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"demo@home24.de","password":"password"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let login: LoginResponse = body_json(response.into_body()).await;
    assert_eq!(login.user.email, "demo@home24.de");
    assert!(!login.token.is_empty());
}

#[tokio::test]
async fn test_login_rejects_other_credentials() {
    let response = demo_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"jane@example.com","password":"guess"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(response.into_body()).await;
    assert_eq!(error.message, "Invalid email or password");
}

#[tokio::test]
async fn test_create_assigns_next_id() {
    let response = demo_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"name":"Bookcase Billy","category_id":1,"attributes":[]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let product: Product = body_json(response.into_body()).await;
    assert_eq!(product.id, 4);
    assert_eq!(product.name, "Bookcase Billy");
}

#[tokio::test]
async fn test_create_rejects_duplicate_attribute_codes() {
    let body = r#"{
        "name": "Broken",
        "category_id": 1,
        "attributes": [
            {"code": "color", "value": "red", "type": "text"},
            {"code": "color", "value": "blue", "type": "text"}
        ]
    }"#;

    let response = demo_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(response.into_body()).await;
    assert!(error.message.contains("color"));
}
