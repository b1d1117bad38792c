// Budget sheet layout: header on row 1, data rows from row 2, six columns A..F.

use super::a1_notation::{A1Notation, SheetRange, ToA1Notation, WholeSheet};

pub const FIRST_COLUMN: &str = "A";
pub const LAST_COLUMN: &str = "F";
pub const FIRST_DATA_ROW: u32 = 2;

/// Every value on the sheet, header included.
pub fn all_values(sheet_title: &str) -> A1Notation {
    WholeSheet(sheet_title.to_string()).to_a1_notation()
}

/// Data rows only.
pub fn data_rows(sheet_title: &str) -> A1Notation {
    SheetRange::new(
        sheet_title,
        &format!("{FIRST_COLUMN}{FIRST_DATA_ROW}"),
        LAST_COLUMN,
    )
    .to_a1_notation()
}

/// Anchor of the table the API appends after.
pub fn append_anchor(sheet_title: &str) -> A1Notation {
    SheetRange::new(
        sheet_title,
        &format!("{FIRST_COLUMN}1"),
        &format!("{LAST_COLUMN}1"),
    )
    .to_a1_notation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_ranges() {
        assert_eq!(all_values("Sheet1").as_ref(), "Sheet1");
        assert_eq!(data_rows("Sheet1").as_ref(), "Sheet1!A2:F");
        assert_eq!(append_anchor("Sheet1").as_ref(), "Sheet1!A1:F1");
    }
}
