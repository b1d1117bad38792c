use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are refreshed this long before they actually expire (3m45s).
pub const REFRESH_THRESHOLD_SECS: i64 = 225;

/// OAuth2 authorized-user credential, stored in the same JSON layout Google's client libraries
/// write to `token.json`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "token", default)]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn is_expired(&self) -> bool {
        match self.expiry {
            None => false,
            Some(expiry) => Utc::now() >= expiry - Duration::seconds(REFRESH_THRESHOLD_SECS),
        }
    }

    /// A credential is usable when it carries an access token that has not expired.
    pub fn is_valid(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty()) && !self.is_expired()
    }

    pub fn can_refresh(&self) -> bool {
        self.is_expired() && self.refresh_token.is_some()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .finish()
    }
}
