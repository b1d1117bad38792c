use crate::domain::sheets::{a1_notation::A1Notation, ranges};

/// Budget document the tool has always written to.
pub const DEFAULT_SPREADSHEET_ID: &str = "1r31bozcuKWcqU03O_5ic-xYKbEZpDZOTZTC3ERyO6Jk";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    pub sheet_name: Box<str>,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.into(),
            sheet_name: DEFAULT_SHEET_NAME.into(),
        }
    }
}

impl SpreadsheetConfig {
    pub fn all_values_range(&self) -> A1Notation {
        ranges::all_values(&self.sheet_name)
    }

    pub fn data_rows_range(&self) -> A1Notation {
        ranges::data_rows(&self.sheet_name)
    }

    pub fn append_range(&self) -> A1Notation {
        ranges::append_anchor(&self.sheet_name)
    }
}
