use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    cells::IntoStringRows,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

pub trait SpreadsheetRead {
    /// Rows of `range` as text. An empty range yields no rows.
    fn read_range(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        let value_range = response.1;
        Ok(value_range.values.into_string_rows())
    }
}
