use chrono::NaiveDate;
use error_stack::ResultExt;
use strum::Display;
use thiserror::Error;
use tracing::instrument;

use super::budget_appender::{AppendError, BudgetAppender};
use super::credential_provider::CredentialProvider;
use crate::domain::{BudgetEntry, EntryRequest};
use crate::ports::budget_repository::SheetConnector;

/// Progress of a single invocation. `Failed` can be reached from any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunState {
    Unauthenticated,
    Authenticated,
    Completed,
    Failed,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    #[error("Authorization failed")]
    Auth,
    #[error("Failed to open budget sheet")]
    Connect,
    #[error("Failed to read budget history")]
    RemoteRead,
    #[error("Failed to compute budget entry")]
    Calculation,
    #[error("Failed to append budget row")]
    RemoteWrite,
    #[error("Run already finished")]
    AlreadyFinished,
}

impl From<AppendError> for RunError {
    fn from(error: AppendError) -> Self {
        match error {
            AppendError::ReadFailed => RunError::RemoteRead,
            AppendError::CalculationFailed => RunError::Calculation,
            AppendError::WriteFailed => RunError::RemoteWrite,
        }
    }
}

/// One authenticate, read, compute, append pass. Every remote call is attempted once.
pub struct BudgetRun<'a> {
    credentials: &'a CredentialProvider,
    connector: &'a dyn SheetConnector,
    state: RunState,
}

impl std::fmt::Debug for BudgetRun<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetRun")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> BudgetRun<'a> {
    pub fn new(credentials: &'a CredentialProvider, connector: &'a dyn SheetConnector) -> Self {
        Self {
            credentials,
            connector,
            state: RunState::Unauthenticated,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!(from = %self.state, to = %next, "Run state changed");
        self.state = next;
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &mut self,
        request: &EntryRequest,
        date: NaiveDate,
    ) -> error_stack::Result<BudgetEntry, RunError> {
        if self.state != RunState::Unauthenticated {
            return Err(error_stack::report!(RunError::AlreadyFinished))
                .attach_printable_lazy(|| format!("Run is in state {}", self.state));
        }

        let result = self.authenticate_and_append(request, date).await;

        match &result {
            Ok(_) => self.transition(RunState::Completed),
            Err(_) => self.transition(RunState::Failed),
        }

        result
    }

    async fn authenticate_and_append(
        &mut self,
        request: &EntryRequest,
        date: NaiveDate,
    ) -> error_stack::Result<BudgetEntry, RunError> {
        let credential = self
            .credentials
            .credential()
            .await
            .change_context(RunError::Auth)?;

        self.transition(RunState::Authenticated);

        let repository = self
            .connector
            .connect(&credential)
            .change_context(RunError::Connect)?;

        BudgetAppender::new(repository)
            .append(request, date)
            .await
            .map_err(|report| {
                let context = RunError::from(*report.current_context());
                report.change_context(context)
            })
    }
}
