pub mod calculator;
pub mod category;
pub mod entry;
pub mod history;

pub use calculator::{parse_or_default, CalculationError, EntryRequest};
pub use category::{BudgetLabel, Category};
pub use entry::BudgetEntry;
pub use history::BudgetHistory;
