pub mod cells;
pub mod http_client;
pub mod sheet_connector;
pub mod spreadsheet_append;
pub mod spreadsheet_budget_repository;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod value_range_factory;
