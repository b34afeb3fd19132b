//! Integration tests driving the real client against an in-process
//! mock backend bound to an ephemeral port.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use shared::{AttrValue, AttributeType, AttributeValue, ProductCreate, ProductUpdate};
use shelf_client::session::{HttpIdentityProvider, IdentityProvider, ProviderError};
use shelf_client::{
    ClientConfig, ClientError, HttpClient, ListFilter, Product, SessionStore, SortDirection,
    session::MemoryKvStore,
};
use shelf_mock::state::{AppState, Catalog};

async fn spawn_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve backend");
    });

    format!("http://{addr}")
}

async fn spawn_mock() -> String {
    let state = Arc::new(AppState::new(Catalog::demo()));
    spawn_router(shelf_mock::app(state)).await
}

async fn client() -> HttpClient {
    ClientConfig::new(spawn_mock().await).build()
}

#[tokio::test]
async fn test_fetch_categories_and_tree() {
    let client = client().await;

    let categories = client.fetch_categories().await.unwrap();
    assert_eq!(categories.len(), 4);

    let tree = client.fetch_category_tree().await.unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].name, "Furniture");
    assert_eq!(tree[0].children.len(), 2);
    assert_eq!(tree[1].name, "Lighting");
    assert!(tree[1].children.is_empty());
}

#[tokio::test]
async fn test_fetch_products_server_paginated() {
    let client = client().await;

    let filter = ListFilter::default()
        .paginate(1, 2)
        .order_by("name", SortDirection::Asc);
    let page = client.fetch_products(&filter).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Corner Sofa Bergen");
    assert_eq!(page.items[1].name, "Floor Lamp Aurora");
}

#[tokio::test]
async fn test_fetch_products_total_respects_category() {
    let client = client().await;

    let filter = ListFilter::default().with_category(2);
    let page = client.fetch_products(&filter).await.unwrap();

    assert_eq!(page.total, 1);
    assert!(page.items.iter().all(|p| p.category_id == 2));
}

#[tokio::test]
async fn test_fetch_products_local_matches_server_strategy() {
    let client = client().await;

    let filter = ListFilter::default()
        .paginate(2, 2)
        .order_by("name", SortDirection::Desc);

    let server = client.fetch_products(&filter).await.unwrap();
    let local = client.fetch_products_local(&filter).await.unwrap();

    assert_eq!(local.total, server.total);
    let server_names: Vec<_> = server.items.iter().map(|p| p.name.clone()).collect();
    let local_names: Vec<_> = local.items.iter().map(|p| p.name.clone()).collect();
    assert_eq!(local_names, server_names);
}

#[tokio::test]
async fn test_fetch_product_by_id() {
    let client = client().await;

    let product = client.fetch_product(2).await.unwrap();
    assert_eq!(product.name, "Oak Dining Table");
}

#[tokio::test]
async fn test_fetch_missing_product_names_the_id() {
    let client = client().await;

    let err = client.fetch_product(999).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("999"));
}

#[tokio::test]
async fn test_create_product_stamps_last_modified() {
    let client = client().await;

    let created = client
        .create_product(ProductCreate {
            name: "Bookcase Billy".into(),
            category_id: 1,
            attributes: vec![AttributeValue {
                code: "shelves".into(),
                value: AttrValue::Number(5.0),
                attr_type: AttributeType::Number,
                label: None,
            }],
            last_modified: None,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 4);
    assert!(created.last_modified.is_some());

    let fetched = client.fetch_product(4).await.unwrap();
    assert_eq!(fetched.name, "Bookcase Billy");
}

#[tokio::test]
async fn test_update_product_stamps_last_modified() {
    let client = client().await;

    let updated = client
        .update_product(
            1,
            ProductUpdate {
                name: Some("Corner Sofa Bergen XL".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Corner Sofa Bergen XL");
    assert!(updated.last_modified.is_some());
}

#[tokio::test]
async fn test_create_rejects_invalid_attributes_before_sending() {
    // Base URL nobody listens on: validation must fail first.
    let client = ClientConfig::new("http://127.0.0.1:1").build();

    let duplicate = |code: &str| AttributeValue {
        code: code.into(),
        value: AttrValue::Text("x".into()),
        attr_type: AttributeType::Text,
        label: None,
    };

    let err = client
        .create_product(ProductCreate {
            name: "Broken".into(),
            category_id: 1,
            attributes: vec![duplicate("color"), duplicate("color")],
            last_modified: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_api_error_carries_server_message() {
    let client = client().await;

    let err = client.get::<Product>("/products/999").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("999"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_caller_headers_merge_over_defaults() {
    use axum::http::{HeaderMap, HeaderValue};

    async fn echo(headers: HeaderMap) -> axum::Json<Vec<String>> {
        let pick = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        axum::Json(vec![pick("x-request-source"), pick("content-type")])
    }

    let base_url = spawn_router(axum::Router::new().route("/echo", axum::routing::get(echo))).await;
    let client = ClientConfig::new(base_url).build();

    let mut headers = HeaderMap::new();
    headers.insert("x-request-source", HeaderValue::from_static("back-office"));

    let echoed: Vec<String> = client.get_with_headers("/echo", headers).await.unwrap();
    assert_eq!(echoed[0], "back-office");
    // Default headers survive the merge
    assert_eq!(echoed[1], "application/json");
}

#[tokio::test]
async fn test_cancelled_token_aborts_request() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = ClientConfig::new(spawn_mock().await)
        .with_cancellation(cancel)
        .build();

    let err = client.fetch_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn test_cancel_during_body_read_surfaces_cancelled() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Raw socket server: send headers and a partial body, then stall so
    // the client is suspended inside the body read when the cancel fires.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 1024\r\n\r\n[",
            )
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
    });

    let cancel = CancellationToken::new();
    let client = ClientConfig::new(format!("http://{addr}"))
        .with_cancellation(cancel.clone())
        .build();

    let request = tokio::spawn(async move { client.fetch_categories().await });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    cancel.cancel();

    let err = request.await.unwrap().unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn test_http_identity_provider_sign_in() {
    let client = client().await;
    let provider = HttpIdentityProvider::new(client);

    let (user, token) = provider
        .sign_in("demo@home24.de", "password")
        .await
        .unwrap();

    assert_eq!(user.email, "demo@home24.de");
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_http_identity_provider_surfaces_rejection() {
    let client = client().await;
    let provider = HttpIdentityProvider::new(client);

    let err = provider
        .sign_in("jane@example.com", "guess")
        .await
        .unwrap_err();

    match err {
        ProviderError::Rejected(message) => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_store_against_backend() {
    let base_url = spawn_mock().await;
    let kv = Arc::new(MemoryKvStore::new());
    let provider = Arc::new(HttpIdentityProvider::new(
        ClientConfig::new(&base_url).build(),
    ));
    let mut store = SessionStore::new(kv.clone(), provider);

    let err = store.login("jane@example.com", "guess").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!store.state().is_authenticated);

    store.login("demo@home24.de", "password").await.unwrap();
    assert!(store.state().is_authenticated);

    // The persisted token now authenticates a fresh client.
    let authed = ClientConfig::new(&base_url)
        .with_token_store(kv.clone())
        .build();
    let products = authed.fetch_product(1).await.unwrap();
    assert_eq!(products.id, 1);
}
