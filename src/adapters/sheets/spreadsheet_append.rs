use error_stack::ResultExt;
use google_sheets4::api::ValueRange;
use serde_json::Value;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    value_range_factory::ValueRangeFactory,
};

pub trait SpreadsheetAppend {
    /// Inserts `cells` as a new row after the table anchored at `range`. Returns the range the
    /// API reports as written, when it reports one.
    fn append_row(
        &self,
        range: &A1Notation,
        cells: Vec<Value>,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Option<String>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetAppend for SpreadsheetManager {
    #[instrument]
    async fn append_row(
        &self,
        range: &A1Notation,
        cells: Vec<Value>,
    ) -> error_stack::Result<Option<String>, SpreadsheetManagerError> {
        let value_range = ValueRange::from_row(cells);

        let response = self
            .hub
            .spreadsheets()
            .values_append(value_range, &self.config.spreadsheet_id, range.as_ref())
            .value_input_option("USER_ENTERED")
            .insert_data_option("INSERT_ROWS")
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToAppendRange)
            .attach_printable_lazy(|| format!("Failed to append to range {} ", range))?;

        Ok(response.1.updates.and_then(|updates| updates.updated_range))
    }
}
