use std::sync::Arc;

use chrono::NaiveDate;
use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::domain::budget::calculator::compute_entry;
use crate::domain::{BudgetEntry, EntryRequest};
use crate::ports::budget_repository::BudgetRepository;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendError {
    #[error("Failed to read budget history")]
    ReadFailed,
    #[error("Failed to compute budget entry")]
    CalculationFailed,
    #[error("Failed to append budget entry")]
    WriteFailed,
}

/// Reads the budget history once, derives the next entry from it and appends that entry.
pub struct BudgetAppender {
    repository: Arc<dyn BudgetRepository>,
}

impl std::fmt::Debug for BudgetAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetAppender")
            .field("repository", &"<BudgetRepository>")
            .finish()
    }
}

impl BudgetAppender {
    pub fn new(repository: Arc<dyn BudgetRepository>) -> Self {
        Self { repository }
    }

    #[instrument]
    pub async fn append(
        &self,
        request: &EntryRequest,
        date: NaiveDate,
    ) -> error_stack::Result<BudgetEntry, AppendError> {
        let history = self
            .repository
            .data_rows()
            .await
            .change_context(AppendError::ReadFailed)?;

        tracing::debug!(rows = history.len(), "Fetched budget history");

        let entry = compute_entry(&history, request, date)
            .change_context(AppendError::CalculationFailed)?;

        self.repository
            .append_entry(&entry)
            .await
            .change_context(AppendError::WriteFailed)
            .attach_printable_lazy(|| format!("Entry not appended: {}", entry))?;

        Ok(entry)
    }
}
