use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shelf_mock::app;
use shelf_mock::state::{AppState, Catalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog = match std::env::var("CATALOG_FILE") {
        Ok(path) => {
            tracing::info!(%path, "Loading catalog from file");
            Catalog::from_file(&path)?
        }
        Err(_) => {
            tracing::info!("No CATALOG_FILE set, using built-in demo catalog");
            Catalog::demo()
        }
    };

    let state = Arc::new(AppState::new(catalog));

    let addr = std::env::var("MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Shelf mock backend listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
