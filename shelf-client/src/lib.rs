//! Shelf Client - HTTP client for the catalog back-office API
//!
//! Typed resource access (categories, products), filter query-string
//! synchronization and the session store.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, QueryParams};
pub use session::{
    IdentityProvider, KvStore, SessionAction, SessionState, SessionStore, TOKEN_KEY, USER_KEY,
};

// Re-export shared types for convenience
pub use shared::{Category, ListFilter, ListPage, Product, SortDirection, User};
