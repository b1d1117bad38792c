use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde_json::{Number, Value};

use crate::domain::budget::entry::DATE_FORMAT;
use crate::domain::BudgetEntry;

/// The API hands back cells as JSON values; budget rows are handled as text.
pub trait IntoStringRows {
    fn into_string_rows(self) -> Vec<Vec<String>>;
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl IntoStringRows for Vec<Vec<Value>> {
    fn into_string_rows(self) -> Vec<Vec<String>> {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

impl IntoStringRows for Option<Vec<Vec<Value>>> {
    /// A range without values (empty sheet) becomes no rows.
    fn into_string_rows(self) -> Vec<Vec<String>> {
        self.map(IntoStringRows::into_string_rows)
            .unwrap_or_default()
    }
}

/// Amounts are sent as JSON numbers so the sheet never re-reads them through its locale.
fn amount_cell(amount: Decimal) -> Value {
    amount
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(amount.normalize().to_string()))
}

/// The row written for `entry`: date and label as text, the four amounts as numbers.
pub fn entry_row(entry: &BudgetEntry) -> Vec<Value> {
    vec![
        Value::String(entry.date.format(DATE_FORMAT).to_string()),
        Value::String(entry.label.to_string()),
        amount_cell(entry.amount_saved),
        amount_cell(entry.cumulative_sum),
        amount_cell(entry.target),
        amount_cell(entry.delta),
    ]
}
