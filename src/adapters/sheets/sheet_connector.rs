use std::sync::Arc;

use error_stack::ResultExt;

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::Credential;
use crate::ports::budget_repository::{BudgetRepository, BudgetRepositoryError, SheetConnector};

use super::spreadsheet_budget_repository::SpreadsheetBudgetRepository;
use super::spreadsheet_manager::SpreadsheetManager;

/// Opens the configured budget sheet through the Google Sheets API.
#[derive(Debug, Clone)]
pub struct GoogleSheetConnector {
    config: SpreadsheetConfig,
}

impl GoogleSheetConnector {
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self { config }
    }
}

impl SheetConnector for GoogleSheetConnector {
    fn connect(
        &self,
        credential: &Credential,
    ) -> error_stack::Result<Arc<dyn BudgetRepository>, BudgetRepositoryError> {
        let access_token = credential.access_token.clone().unwrap_or_default();
        let spreadsheet_manager = SpreadsheetManager::new(self.config.clone(), access_token)
            .change_context(BudgetRepositoryError::Connect)?;

        Ok(Arc::new(SpreadsheetBudgetRepository::new(
            self.config.clone(),
            Arc::new(spreadsheet_manager),
        )))
    }
}
