use google_sheets4::api::ValueRange;
use serde_json::Value;

pub trait ValueRangeFactory {
    fn from_row(cells: Vec<Value>) -> Self;
}

impl ValueRangeFactory for ValueRange {
    /// A single row. Text cells are parsed by the sheet under `USER_ENTERED`; numbers are kept.
    fn from_row(cells: Vec<Value>) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![cells]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_row() {
        let row = vec![json!("2024-01-01"), json!("Flight"), json!(100)];
        let value_range = ValueRange::from_row(row.clone());
        assert_eq!(
            value_range.major_dimension,
            Some("ROWS".to_string()),
            "Major dimension should be ROWS"
        );
        assert_eq!(value_range.range, None, "Range should be None");
        assert_eq!(
            value_range.values,
            Some(vec![row]),
            "Values should be a single row"
        );
    }
}
