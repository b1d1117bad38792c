use std::fmt::Debug;
use std::sync::Arc;

use error_stack::ResultExt;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::{BudgetEntry, BudgetHistory};
use crate::ports::budget_repository::{BudgetRepository, BudgetRepositoryError};

use super::cells::entry_row;
use super::spreadsheet_append::SpreadsheetAppend;
use super::spreadsheet_manager::SpreadsheetManager;
use super::spreadsheet_read::SpreadsheetRead;

/// Budget rows kept on the configured sheet, read and appended through `sheets`.
#[derive(Debug)]
pub struct SpreadsheetBudgetRepository<S = SpreadsheetManager> {
    config: SpreadsheetConfig,
    sheets: Arc<S>,
}

impl<S> SpreadsheetBudgetRepository<S> {
    pub fn new(config: SpreadsheetConfig, sheets: Arc<S>) -> Self {
        Self { config, sheets }
    }
}

/// Logs a failed read and turns it into `None`.
fn ok_or_log<T, C: error_stack::Context>(result: error_stack::Result<T, C>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(report) => {
            tracing::error!("{:?}", report);
            None
        }
    }
}

#[async_trait::async_trait]
impl<S> BudgetRepository for SpreadsheetBudgetRepository<S>
where
    S: SpreadsheetRead + SpreadsheetAppend + Debug + Send + Sync + 'static,
{
    #[instrument(skip(self))]
    async fn all_values(&self) -> Option<Vec<Vec<String>>> {
        let range = self.config.all_values_range();
        ok_or_log(self.sheets.read_range(&range).await)
    }

    #[instrument(skip(self))]
    async fn data_rows(&self) -> error_stack::Result<BudgetHistory, BudgetRepositoryError> {
        let range = self.config.data_rows_range();
        self.sheets
            .read_range(&range)
            .await
            .map(BudgetHistory::new)
            .change_context(BudgetRepositoryError::FetchRows)
    }

    #[instrument(skip(self))]
    async fn append_entry(
        &self,
        entry: &BudgetEntry,
    ) -> error_stack::Result<(), BudgetRepositoryError> {
        let range = self.config.append_range();
        let updated_range = self
            .sheets
            .append_row(&range, entry_row(entry))
            .await
            .change_context(BudgetRepositoryError::AppendRow)?;

        if let Some(updated_range) = updated_range {
            tracing::debug!("Appended row at {}", updated_range);
        }
        Ok(())
    }
}
