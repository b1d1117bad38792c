use std::path::{Path, PathBuf};

use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::Credential;
use crate::ports::credentials::{CredentialStore, CredentialStoreError};

/// Credential cache kept as a JSON file (`token.json` by default).
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileCredentialStore {
    #[instrument]
    async fn load(&self) -> Option<Credential> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No cached credential at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!("Ignoring unreadable credential cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    #[instrument(skip(credential))]
    async fn save(&self, credential: &Credential) -> error_stack::Result<(), CredentialStoreError> {
        let contents = serde_json::to_string_pretty(credential)
            .change_context(CredentialStoreError::PersistFailed)?;

        tokio::fs::write(&self.path, contents)
            .await
            .change_context(CredentialStoreError::PersistFailed)
            .attach_printable_lazy(|| format!("Failed to write {}", self.path.display()))?;

        // Owner-only, the file holds OAuth tokens.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .change_context(CredentialStoreError::PersistFailed)
                .attach_printable_lazy(|| {
                    format!("Failed to set permissions on {}", self.path.display())
                })?;
        }

        tracing::debug!("Credential cached at {}", self.path.display());
        Ok(())
    }
}
