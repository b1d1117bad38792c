pub mod budget_repository;
pub mod credentials;
