use strum::{Display, EnumString};

/// Expense category chosen on the command line. Drives how the target is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Flight,
    Other,
}

/// Text written to the label column of a budget row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum BudgetLabel {
    #[strum(serialize = "Flight")]
    Flight,
    #[strum(serialize = "Trip Expenses")]
    TripExpenses,
}

impl BudgetLabel {
    /// Entries without a category are booked as trip expenses.
    pub fn for_category(category: Option<Category>) -> Self {
        match category {
            Some(Category::Flight) => BudgetLabel::Flight,
            Some(Category::Other) | None => BudgetLabel::TripExpenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for_category() {
        assert_eq!(
            BudgetLabel::for_category(Some(Category::Flight)),
            BudgetLabel::Flight
        );
        assert_eq!(
            BudgetLabel::for_category(Some(Category::Other)),
            BudgetLabel::TripExpenses
        );
        assert_eq!(BudgetLabel::for_category(None), BudgetLabel::TripExpenses);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(BudgetLabel::Flight.to_string(), "Flight");
        assert_eq!(BudgetLabel::TripExpenses.to_string(), "Trip Expenses");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("flight".parse::<Category>(), Ok(Category::Flight));
        assert_eq!("OTHER".parse::<Category>(), Ok(Category::Other));
        assert!("hotel".parse::<Category>().is_err());
    }
}
