//! Identity provider seam
//!
//! Non-demo logins delegate to an external identity provider, consumed
//! only through this trait. The HTTP implementation drives the mock
//! backend's login endpoint; tests substitute fakes.

use async_trait::async_trait;
use thiserror::Error;

use shared::{LoginRequest, LoginResponse, User};

use crate::{ClientError, HttpClient};

/// Identity provider failure
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the credentials with its own message
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached or answered garbage
    #[error("identity provider unavailable")]
    Unavailable,
}

/// External authentication collaborator
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a user and a bearer token
    async fn sign_in(&self, email: &str, password: &str) -> Result<(User, String), ProviderError>;

    /// Invalidate the provider-side session
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Identity provider backed by the catalog backend's `/api/login`
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    http: HttpClient,
}

impl HttpIdentityProvider {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(User, String), ProviderError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.http.post::<LoginResponse, _>("/api/login", &request).await {
            Ok(response) => Ok((response.user, response.token)),
            // Server-side rejections carry a message worth surfacing
            Err(ClientError::Api { message, .. }) => Err(ProviderError::Rejected(message)),
            Err(err) => {
                tracing::error!(error = %err, "Identity provider sign-in failed");
                Err(ProviderError::Unavailable)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        // The mock backend keeps no server-side session state.
        Ok(())
    }
}
