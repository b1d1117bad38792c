use std::str::FromStr;

use chrono::NaiveDate;
use error_stack::{report, ResultExt};
use rust_decimal::Decimal;
use thiserror::Error;

use super::{BudgetEntry, BudgetHistory, BudgetLabel, Category};

/// Monthly amount set aside for each flight booked so far (416.67).
pub const FLIGHT_INSTALLMENT: Decimal = Decimal::from_parts(41667, 0, 0, false, 2);

/// Increment added to the previous target for every non-flight entry (305.72).
pub const OTHER_INCREMENT: Decimal = Decimal::from_parts(30572, 0, 0, false, 2);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Amount out of range while computing the budget entry")]
    Overflow,
}

fn overflow(operation: &'static str) -> impl FnOnce() -> error_stack::Report<CalculationError> {
    move || report!(CalculationError::Overflow).attach_printable(operation)
}

/// Input of a single run: what was saved and under which category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRequest {
    pub saved: Decimal,
    pub category: Option<Category>,
}

impl EntryRequest {
    pub fn new(saved: Decimal, category: Option<Category>) -> Self {
        Self { saved, category }
    }
}

/// Parses a spreadsheet cell as a decimal, falling back to `default` when the cell is missing or
/// does not hold a number. Parse failures are never reported.
pub fn parse_or_default(cell: Option<&str>, default: Decimal) -> Decimal {
    let Some(cell) = cell.map(str::trim) else {
        return default;
    };

    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .unwrap_or(default)
}

/// Previous cumulative sum plus the amount saved now.
pub fn cumulative_sum(
    history: &BudgetHistory,
    saved: Decimal,
) -> error_stack::Result<Decimal, CalculationError> {
    let previous = history.previous_cumulative_sum();
    previous
        .checked_add(saved)
        .ok_or_else(overflow("cumulative sum"))
        .attach_printable_lazy(|| format!("{} + {}", previous, saved))
}

pub fn target_amount(
    history: &BudgetHistory,
    category: Option<Category>,
) -> error_stack::Result<Decimal, CalculationError> {
    match category {
        Some(Category::Flight) => Decimal::from(history.flight_count() + 1)
            .checked_mul(FLIGHT_INSTALLMENT)
            .ok_or_else(overflow("flight target")),
        Some(Category::Other) => history
            .previous_target()
            .checked_add(OTHER_INCREMENT)
            .ok_or_else(overflow("other target")),
        None => Ok(Decimal::ZERO),
    }
}

/// Builds the entry to append on `date` from the rows already in the sheet. Amounts too large
/// for a decimal are reported instead of wrapping or panicking.
pub fn compute_entry(
    history: &BudgetHistory,
    request: &EntryRequest,
    date: NaiveDate,
) -> error_stack::Result<BudgetEntry, CalculationError> {
    let cumulative_sum = cumulative_sum(history, request.saved)?;
    let target = target_amount(history, request.category)?;
    let delta = cumulative_sum
        .checked_sub(target)
        .ok_or_else(overflow("delta"))?;

    Ok(BudgetEntry {
        date,
        label: BudgetLabel::for_category(request.category),
        amount_saved: request.saved,
        cumulative_sum,
        target,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(FLIGHT_INSTALLMENT, dec("416.67"));
        assert_eq!(OTHER_INCREMENT, dec("305.72"));
    }

    #[test]
    fn test_parse_or_default() {
        let default = dec("7");
        assert_eq!(parse_or_default(Some("12.5"), default), dec("12.5"));
        assert_eq!(parse_or_default(Some(" -3 "), default), dec("-3"));
        assert_eq!(parse_or_default(Some("1e3"), default), dec("1000"));
        assert_eq!(parse_or_default(Some("n/a"), default), default);
        assert_eq!(parse_or_default(Some(""), default), default);
        assert_eq!(parse_or_default(None, default), default);
    }

    #[test]
    fn test_empty_sheet_flight() {
        let request = EntryRequest::new(dec("100"), Some(Category::Flight));
        let entry = compute_entry(&BudgetHistory::default(), &request, date()).unwrap();

        assert_eq!(entry.label, BudgetLabel::Flight);
        assert_eq!(entry.amount_saved, dec("100"));
        assert_eq!(entry.cumulative_sum, dec("100"));
        assert_eq!(entry.target, dec("416.67"));
        assert_eq!(entry.delta, dec("-316.67"));
    }

    #[test]
    fn test_second_flight() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Flight",
            "100",
            "100",
            "416.67",
            "-316.67",
        ])]);
        let request = EntryRequest::new(dec("50"), Some(Category::Flight));
        let entry = compute_entry(&history, &request, date()).unwrap();

        assert_eq!(entry.target, dec("833.34"));
        assert_eq!(entry.cumulative_sum, dec("150"));
        assert_eq!(entry.delta, dec("-683.34"));
    }

    #[test]
    fn test_other_builds_on_previous_target() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Trip Expenses",
            "50",
            "50",
            "305.72",
            "-255.72",
        ])]);
        let request = EntryRequest::new(dec("20"), Some(Category::Other));
        let entry = compute_entry(&history, &request, date()).unwrap();

        assert_eq!(entry.label, BudgetLabel::TripExpenses);
        assert_eq!(entry.target, dec("611.44"));
        assert_eq!(entry.cumulative_sum, dec("70"));
        assert_eq!(entry.delta, dec("-541.44"));
    }

    #[test]
    fn test_other_with_unreadable_target() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Trip Expenses",
            "50",
            "50",
            "#REF!",
        ])]);
        assert_eq!(
            target_amount(&history, Some(Category::Other)).unwrap(),
            dec("305.72")
        );
    }

    #[test]
    fn test_malformed_cumulative_without_category() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Trip Expenses",
            "50",
            "fifty",
            "305.72",
            "-255.72",
        ])]);
        let request = EntryRequest::new(dec("10"), None);
        let entry = compute_entry(&history, &request, date()).unwrap();

        assert_eq!(entry.cumulative_sum, dec("10"));
        assert_eq!(entry.target, Decimal::ZERO);
        assert_eq!(entry.delta, dec("10"));
    }

    #[test]
    fn test_flight_target_ignores_last_row_target() {
        let history = BudgetHistory::new(vec![
            row(&["2024-01-01", "Flight", "100", "100", "416.67"]),
            row(&["2024-01-02", "Trip Expenses", "10", "110", "9999"]),
            row(&["2024-01-03", " flight", "10", "120", "833.34"]),
        ]);
        assert_eq!(
            target_amount(&history, Some(Category::Flight)).unwrap(),
            dec("1250.01")
        );
    }

    #[test]
    fn test_delta_is_cumulative_minus_target() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Flight",
            "900",
            "900",
            "416.67",
        ])]);
        for category in [None, Some(Category::Flight), Some(Category::Other)] {
            let request = EntryRequest::new(dec("12.34"), category);
            let entry = compute_entry(&history, &request, date()).unwrap();
            assert_eq!(entry.delta, entry.cumulative_sum - entry.target);
        }
    }

    #[test]
    fn test_cumulative_overflow_is_reported() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Trip Expenses",
            "1",
            "79228162514264337593543950335",
        ])]);
        let request = EntryRequest::new(dec("1"), None);

        let report = compute_entry(&history, &request, date()).unwrap_err();
        assert_eq!(*report.current_context(), CalculationError::Overflow);
    }

    #[test]
    fn test_target_overflow_is_reported() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Trip Expenses",
            "1",
            "1",
            "79228162514264337593543950335",
        ])]);

        let request = EntryRequest::new(dec("1"), Some(Category::Other));

        assert!(target_amount(&history, Some(Category::Other)).is_err());
        assert!(compute_entry(&history, &request, date()).is_err());
    }

    #[test]
    fn test_delta_overflow_is_reported() {
        let history = BudgetHistory::new(vec![row(&[
            "2024-01-01",
            "Trip Expenses",
            "1",
            "-79228162514264337593543950000",
            "79228162514264337593543950000",
        ])]);
        let request = EntryRequest::new(dec("0"), Some(Category::Other));

        let report = compute_entry(&history, &request, date()).unwrap_err();
        assert_eq!(*report.current_context(), CalculationError::Overflow);
    }
}
