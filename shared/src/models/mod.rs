//! Data models
//!
//! Shared between shelf-mock and the client (via API).
//! Resource ids are `i64`; the backend is known to emit them both as
//! integers and as numeric strings, so deserialization accepts either.

pub mod category;
pub mod product;
pub mod user;

mod flexible_id;

pub(crate) use flexible_id::{flexible_id, flexible_id_opt};

// Re-exports
pub use category::*;
pub use product::*;
pub use user::*;
