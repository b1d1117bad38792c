use rust_decimal::Decimal;

use super::calculator::parse_or_default;

/// Column positions of a budget row, zero-based.
pub mod columns {
    pub const LABEL: usize = 1;
    pub const CUMULATIVE_SUM: usize = 3;
    pub const TARGET: usize = 4;
}

/// Data rows of the budget sheet (header excluded), in sheet order.
///
/// Rows come straight from the spreadsheet, so they can be shorter than six cells when trailing
/// cells are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetHistory {
    rows: Vec<Vec<String>>,
}

impl BudgetHistory {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn last_row(&self) -> Option<&[String]> {
        self.rows.last().map(Vec::as_slice)
    }

    fn last_row_cell(&self, column: usize) -> Option<&str> {
        self.last_row()
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }

    /// Cumulative sum recorded on the last row, zero when missing or unreadable.
    pub fn previous_cumulative_sum(&self) -> Decimal {
        parse_or_default(self.last_row_cell(columns::CUMULATIVE_SUM), Decimal::ZERO)
    }

    /// Target recorded on the last row, zero when missing or unreadable.
    pub fn previous_target(&self) -> Decimal {
        parse_or_default(self.last_row_cell(columns::TARGET), Decimal::ZERO)
    }

    /// Number of rows labelled as flights. Labels are compared trimmed and case-insensitively.
    pub fn flight_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.get(columns::LABEL))
            .filter(|label| label.trim().eq_ignore_ascii_case("flight"))
            .count()
    }
}
