pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// OAuth client secret downloaded from the Google Cloud console. Only read when the user has to
    /// authorize the application again.
    pub client_secret: Box<str>,
    /// Where the authorized credential is cached between runs.
    pub token_cache: Box<str>,
    pub scopes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_secret: "credentials.json".into(),
            token_cache: "token.json".into(),
            scopes: vec![SPREADSHEETS_SCOPE.to_string()],
        }
    }
}
