pub mod budget_appender;
pub mod budget_run;
pub mod credential_provider;
