use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self) -> A1Notation;
}

/// Sheet names made of letters, digits and underscores (not starting with a digit) can be used
/// as-is; anything else has to be quoted, with inner quotes doubled.
fn quote_sheet_title(sheet_title: &str) -> String {
    let plain = !sheet_title.is_empty()
        && !sheet_title.starts_with(|c: char| c.is_ascii_digit())
        && sheet_title.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        sheet_title.to_string()
    } else {
        format!("'{}'", sheet_title.replace('\'', "''"))
    }
}

/// A rectangular range on a named sheet, e.g. `Sheet1!A2:F`.
///
/// `start` and `end` are kept as written so open ranges such as `A2:F` (all rows from 2 on)
/// can be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet_title: String,
    pub start: String,
    pub end: String,
}

impl SheetRange {
    pub fn new(sheet_title: impl Into<String>, start: &str, end: &str) -> Self {
        Self {
            sheet_title: sheet_title.into(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

impl ToA1Notation for SheetRange {
    fn to_a1_notation(&self) -> A1Notation {
        A1Notation(format!(
            "{}!{}:{}",
            quote_sheet_title(&self.sheet_title),
            self.start,
            self.end
        ))
    }
}

/// A whole sheet, addressed by its title alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeSheet(pub String);

impl ToA1Notation for WholeSheet {
    fn to_a1_notation(&self) -> A1Notation {
        A1Notation(quote_sheet_title(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sheet_range() {
        let range = SheetRange::new("Sheet1", "A2", "F");
        assert_eq!(range.to_a1_notation().as_ref(), "Sheet1!A2:F");
    }

    #[test]
    fn test_quoted_sheet_range() {
        let range = SheetRange::new("Trip budget", "A1", "F1");
        assert_eq!(range.to_a1_notation().as_ref(), "'Trip budget'!A1:F1");
    }

    #[test]
    fn test_sheet_title_with_quote() {
        let sheet = WholeSheet("Mike's".to_string());
        assert_eq!(sheet.to_a1_notation().to_string(), "'Mike''s'");
    }

    #[test]
    fn test_sheet_title_starting_with_digit() {
        let sheet = WholeSheet("2024".to_string());
        assert_eq!(String::from(sheet.to_a1_notation()), "'2024'");
    }
}
