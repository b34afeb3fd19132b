//! Typed resource access
//!
//! Resource methods are grouped per resource as impl blocks on
//! [`crate::HttpClient`].

mod categories;
mod products;
