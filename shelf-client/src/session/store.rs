//! Session store
//!
//! A reducer over four actions (request, success, failure, logout) with
//! persistence side effects kept outside the reducer. On construction
//! the store hydrates from the persisted `token` + `user` keys;
//! malformed persisted data is treated as no session and purged.

use std::sync::Arc;

use thiserror::Error;

use shared::User;

use super::{IdentityProvider, KvStore, ProviderError};

/// Persisted bearer token key
pub const TOKEN_KEY: &str = "token";
/// Persisted serialized [`User`] key
pub const USER_KEY: &str = "user";

const DEMO_EMAIL: &str = "demo@home24.de";
const DEMO_PASSWORD: &str = "password";
const DEMO_USER_ID: &str = "demo-user-id";
const DEMO_TOKEN: &str = "demo-token-123456";

const GENERIC_LOGIN_ERROR: &str = "An unexpected error occurred during login";

/// Session state snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Session transitions
#[derive(Debug, Clone)]
pub enum SessionAction {
    LoginRequest,
    LoginSuccess { user: User, token: String },
    LoginFailure(String),
    Logout,
}

/// Pure reducer over [`SessionAction`]
pub fn reduce(state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::LoginRequest => SessionState {
            is_loading: true,
            error: None,
            ..state
        },
        SessionAction::LoginSuccess { user, token } => SessionState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
            error: None,
        },
        SessionAction::LoginFailure(message) => SessionState {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: false,
            error: Some(message),
        },
        // Logout leaves error and is_loading untouched
        SessionAction::Logout => SessionState {
            user: None,
            token: None,
            is_authenticated: false,
            ..state
        },
    }
}

/// Session store error
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Login(String),
}

/// Reducer-driven session store over an injected key-value collaborator
pub struct SessionStore {
    state: SessionState,
    kv: Arc<dyn KvStore>,
    provider: Arc<dyn IdentityProvider>,
}

impl SessionStore {
    /// Create the store, hydrating from persisted state.
    ///
    /// A persisted token with a well-formed user JSON restores an
    /// authenticated session without any network call. Malformed user
    /// JSON purges both keys.
    pub fn new(kv: Arc<dyn KvStore>, provider: Arc<dyn IdentityProvider>) -> Self {
        let state = Self::hydrate(kv.as_ref());
        Self {
            state,
            kv,
            provider,
        }
    }

    fn hydrate(kv: &dyn KvStore) -> SessionState {
        let Some(token) = kv.get(TOKEN_KEY) else {
            return SessionState::default();
        };

        match kv.get(USER_KEY) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => SessionState {
                    user: Some(user),
                    token: Some(token),
                    is_authenticated: true,
                    is_loading: false,
                    error: None,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "Purging malformed persisted session");
                    kv.remove(TOKEN_KEY);
                    kv.remove(USER_KEY);
                    SessionState::default()
                }
            },
            // Token without a user record: keep the token so requests
            // still authenticate, but there is no one to display.
            None => SessionState {
                user: None,
                token: Some(token),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply an action through the reducer
    pub fn dispatch(&mut self, action: SessionAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Log in.
    ///
    /// The demo credential pair short-circuits to a fixed user and token
    /// without consulting the identity provider; everything else goes
    /// through [`IdentityProvider::sign_in`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        self.dispatch(SessionAction::LoginRequest);

        let result = if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            Ok((demo_user(), DEMO_TOKEN.to_string()))
        } else {
            self.provider.sign_in(email, password).await
        };

        match result {
            Ok((user, token)) => {
                self.kv.set(TOKEN_KEY, &token);
                if let Ok(json) = serde_json::to_string(&user) {
                    self.kv.set(USER_KEY, &json);
                }
                self.dispatch(SessionAction::LoginSuccess { user, token });
                Ok(())
            }
            Err(err) => {
                let message = match err {
                    ProviderError::Rejected(message) => message,
                    ProviderError::Unavailable => GENERIC_LOGIN_ERROR.to_string(),
                };
                self.kv.remove(TOKEN_KEY);
                self.kv.remove(USER_KEY);
                self.dispatch(SessionAction::LoginFailure(message.clone()));
                Err(SessionError::Login(message))
            }
        }
    }

    /// Log out: clear credentials and persisted keys.
    ///
    /// Demo sessions skip the provider sign-out; a token-only session
    /// with no user record may hold a provider token, so it signs out.
    /// Provider failures are logged but never block the local logout.
    pub async fn logout(&mut self) {
        let is_demo = self
            .state
            .user
            .as_ref()
            .is_some_and(|user| user.email == DEMO_EMAIL);

        if !is_demo
            && let Err(err) = self.provider.sign_out().await
        {
            tracing::warn!(error = %err, "Provider sign-out failed");
        }

        self.kv.remove(TOKEN_KEY);
        self.kv.remove(USER_KEY);
        self.dispatch(SessionAction::Logout);
    }
}

fn demo_user() -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        name: "Demo User".to_string(),
    }
}
