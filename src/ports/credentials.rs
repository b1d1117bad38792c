use thiserror::Error;

use crate::domain::Credential;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to read client secret")]
    ClientSecret,
    #[error("Failed to refresh access token")]
    RefreshFailed,
    #[error("Authorization flow failed: {details}")]
    AuthorizationFailed { details: String },
    #[error("Token endpoint rejected the request")]
    TokenEndpoint,
}

impl AuthError {
    pub fn authorization_failed<S: Into<String>>(details: S) -> Self {
        AuthError::AuthorizationFailed {
            details: details.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CredentialStoreError {
    #[error("Failed to persist credential")]
    PersistFailed,
}

/// Local cache of the last credential obtained.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// The cached credential, or `None` when the cache is absent or unreadable.
    async fn load(&self) -> Option<Credential>;

    /// Overwrites the cache with `credential`.
    async fn save(&self, credential: &Credential)
        -> error_stack::Result<(), CredentialStoreError>;
}

#[async_trait::async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, credential: &Credential)
        -> error_stack::Result<Credential, AuthError>;
}

/// Interactive consent. Blocks until the user has authorized the application.
#[async_trait::async_trait]
pub trait AuthorizationFlow: Send + Sync {
    async fn obtain_new_credential(&self) -> error_stack::Result<Credential, AuthError>;
}
