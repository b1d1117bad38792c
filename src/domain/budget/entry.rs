use std::fmt::Formatter;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::BudgetLabel;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the budget sheet. Created once at append time and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetEntry {
    pub date: NaiveDate,
    pub label: BudgetLabel,
    pub amount_saved: Decimal,
    pub cumulative_sum: Decimal,
    pub target: Decimal,
    pub delta: Decimal,
}

impl BudgetEntry {
    /// The six cells of the row, in column order.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.label.to_string(),
            format_amount(self.amount_saved),
            format_amount(self.cumulative_sum),
            format_amount(self.target),
            format_amount(self.delta),
        ]
    }
}

/// Plain notation without trailing zeros, which the sheet reads back as a number.
fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

impl std::fmt::Display for BudgetEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cells = self.to_cells();
        write!(
            f,
            "['{}', '{}', {}, {}, {}, {}]",
            cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
        )
    }
}
