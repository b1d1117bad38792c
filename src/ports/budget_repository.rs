use std::sync::Arc;

use thiserror::Error;

use crate::domain::{BudgetEntry, BudgetHistory, Credential};

#[derive(Error, Debug)]
pub enum BudgetRepositoryError {
    #[error("Failed to connect to budget repository")]
    Connect,
    #[error("Failed to fetch budget rows from repository")]
    FetchRows,
    #[error("Failed to append budget row to repository")]
    AppendRow,
}

#[async_trait::async_trait]
pub trait BudgetRepository: Send + Sync {
    /// Every value of the budget sheet, header included. Remote failures are logged and
    /// reported as `None`.
    async fn all_values(&self) -> Option<Vec<Vec<String>>>;

    /// Data rows of the budget sheet, header excluded. An empty sheet yields an empty history.
    async fn data_rows(&self) -> error_stack::Result<BudgetHistory, BudgetRepositoryError>;

    /// Appends the entry after the last row. Existing rows are never overwritten.
    async fn append_entry(
        &self,
        entry: &BudgetEntry,
    ) -> error_stack::Result<(), BudgetRepositoryError>;
}

/// Opens a repository authorized with the given credential.
pub trait SheetConnector: Send + Sync {
    fn connect(
        &self,
        credential: &Credential,
    ) -> error_stack::Result<Arc<dyn BudgetRepository>, BudgetRepositoryError>;
}
