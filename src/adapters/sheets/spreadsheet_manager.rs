use error_stack::ResultExt;
use google_sheets4::Sheets;
use std::fmt::Debug;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;

use super::http_client::{self, HttpsConnector};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to build HTTPS client")]
    HttpClient,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to append to range")]
    FailedToAppendRange,
}

impl SpreadsheetManager {
    /// Every request made through the hub carries `access_token` as its bearer token.
    #[instrument(name = "SpreadsheetManager::new", skip(access_token))]
    pub fn new(
        config: SpreadsheetConfig,
        access_token: String,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client()
            .change_context(SpreadsheetManagerError::HttpClient)
            .attach_printable("Could not load native root certificates")?;
        let hub = Sheets::new(client, access_token);

        Ok(SpreadsheetManager { config, hub })
    }
}
