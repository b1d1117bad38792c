use std::sync::Arc;

use tracing::instrument;

use crate::domain::Credential;
use crate::ports::credentials::{AuthError, AuthorizationFlow, CredentialStore, TokenRefresher};

/// Hands out a usable access credential: the cached one while it is valid, a refreshed one once
/// it expires, and a freshly authorized one otherwise. Every new credential is written back to the
/// cache.
pub struct CredentialProvider {
    store: Arc<dyn CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
    flow: Arc<dyn AuthorizationFlow>,
}

impl std::fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialProvider").finish_non_exhaustive()
    }
}

impl CredentialProvider {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        refresher: Arc<dyn TokenRefresher>,
        flow: Arc<dyn AuthorizationFlow>,
    ) -> Self {
        Self {
            store,
            refresher,
            flow,
        }
    }

    #[instrument(skip(self))]
    pub async fn credential(&self) -> error_stack::Result<Credential, AuthError> {
        let cached = self.store.load().await;

        if let Some(credential) = cached.as_ref().filter(|c| c.is_valid()) {
            tracing::debug!("Using cached credential");
            return Ok(credential.clone());
        }

        let credential = match cached {
            Some(expired) if expired.can_refresh() => {
                tracing::info!("Cached credential expired, refreshing");
                self.refresher.refresh(&expired).await?
            }
            _ => {
                tracing::info!("No usable cached credential, starting authorization flow");
                self.flow.obtain_new_credential().await?
            }
        };

        // The credential is usable even if it could not be cached; the next run authorizes again.
        if let Err(report) = self.store.save(&credential).await {
            tracing::warn!("Could not cache credential: {:?}", report);
        }

        Ok(credential)
    }
}
