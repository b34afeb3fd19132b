//! Shared types for the Shelf catalog back-office
//!
//! Wire-level data models, the listing pipeline, the category tree
//! builder and error types. Used by both shelf-client and shelf-mock.

pub mod category_tree;
pub mod error;
pub mod models;
pub mod query;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use category_tree::{CategoryNode, build_category_tree};
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{
    AttrValue, AttributeType, AttributeValue, Category, LoginRequest, LoginResponse, Product,
    ProductCreate, ProductUpdate, User,
};
pub use query::{ListFilter, ListPage, Listable, SortConfig, SortDirection, SortValue};
pub use response::ErrorBody;
