//! Session layer
//!
//! A reducer-driven session store persisted through an injected
//! key-value collaborator, plus the identity-provider seam the login
//! flow delegates to for non-demo credentials.

pub mod kv;
pub mod provider;
pub mod store;

pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use provider::{HttpIdentityProvider, IdentityProvider, ProviderError};
pub use store::{SessionAction, SessionError, SessionState, SessionStore, TOKEN_KEY, USER_KEY};
