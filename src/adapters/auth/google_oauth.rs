use std::path::PathBuf;

use chrono::{Duration, Utc};
use error_stack::{report, ResultExt};
use google_sheets4::oauth2;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::instrument;

use crate::domain::Credential;
use crate::ports::credentials::{AuthError, AuthorizationFlow, TokenRefresher};

use super::loopback;

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Body of a successful response from the token endpoint.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    /// Google usually omits the refresh token on refresh, in which case `base` keeps its own.
    fn into_credential(self, base: Credential) -> Credential {
        Credential {
            access_token: Some(self.access_token),
            refresh_token: self.refresh_token.or(base.refresh_token),
            expiry: self
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
            scopes: self
                .scope
                .map(|scope| scope.split_whitespace().map(str::to_string).collect())
                .unwrap_or(base.scopes),
            ..base
        }
    }
}

async fn read_token_response(
    response: reqwest::Response,
) -> error_stack::Result<TokenResponse, AuthError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(report!(AuthError::TokenEndpoint))
            .attach_printable_lazy(|| format!("status {}: {}", status, body));
    }

    response
        .json::<TokenResponse>()
        .await
        .change_context(AuthError::TokenEndpoint)
        .attach_printable("Unexpected token response body")
}

/// Talks to Google's OAuth2 endpoints on behalf of an installed application.
#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_secret_path: PathBuf,
    scopes: Vec<String>,
}

impl GoogleOAuthClient {
    pub fn new(client_secret_path: impl Into<PathBuf>, scopes: Vec<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_secret_path: client_secret_path.into(),
            scopes,
        }
    }
}

#[async_trait::async_trait]
impl TokenRefresher for GoogleOAuthClient {
    #[instrument(skip(self))]
    async fn refresh(&self, credential: &Credential) -> error_stack::Result<Credential, AuthError> {
        let (Some(refresh_token), Some(client_id)) =
            (&credential.refresh_token, &credential.client_id)
        else {
            return Err(report!(AuthError::RefreshFailed))
                .attach_printable("Cached credential lacks a refresh token or client id");
        };

        let token_uri = credential.token_uri.as_deref().unwrap_or(GOOGLE_TOKEN_URI);
        let client_secret = credential.client_secret.as_deref().unwrap_or_default();

        let response = self
            .http
            .post(token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .change_context(AuthError::RefreshFailed)
            .attach_printable_lazy(|| format!("POST {}", token_uri))?;

        let tokens = read_token_response(response)
            .await
            .change_context(AuthError::RefreshFailed)?;

        tracing::info!("Access token refreshed");
        Ok(tokens.into_credential(credential.clone()))
    }
}

#[async_trait::async_trait]
impl AuthorizationFlow for GoogleOAuthClient {
    #[instrument(skip(self))]
    async fn obtain_new_credential(&self) -> error_stack::Result<Credential, AuthError> {
        let secret = oauth2::read_application_secret(&self.client_secret_path)
            .await
            .change_context(AuthError::ClientSecret)
            .attach_printable_lazy(|| {
                format!(
                    "Could not read OAuth client secret at '{}'. Download it from the Google Cloud console.",
                    self.client_secret_path.display()
                )
            })?;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .change_context(AuthError::authorization_failed(
                "failed to bind callback listener",
            ))?;
        let port = listener
            .local_addr()
            .change_context(AuthError::authorization_failed(
                "failed to bind callback listener",
            ))?
            .port();

        let redirect_uri = loopback::redirect_uri(port);
        let state = loopback::random_state();
        let url = loopback::consent_url(
            &secret.auth_uri,
            &secret.client_id,
            &redirect_uri,
            &self.scopes,
            &state,
        )?;

        tracing::info!("Open this URL in your browser to authorize access:\n\n{}\n", url);
        if open::that(url.as_str()).is_err() {
            tracing::warn!("Could not open the browser automatically, please copy the URL above");
        }

        let code = loopback::wait_for_callback(&listener, &state).await?;
        tracing::info!("Received authorization code, exchanging it for tokens");

        let response = self
            .http
            .post(&secret.token_uri)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("client_id", secret.client_id.as_str()),
                ("client_secret", secret.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await
            .change_context(AuthError::TokenEndpoint)
            .attach_printable_lazy(|| format!("POST {}", secret.token_uri))?;

        let tokens = read_token_response(response).await?;

        Ok(tokens.into_credential(Credential {
            access_token: None,
            refresh_token: None,
            token_uri: Some(secret.token_uri),
            client_id: Some(secret.client_id),
            client_secret: Some(secret.client_secret),
            scopes: self.scopes.clone(),
            expiry: None,
        }))
    }
}
