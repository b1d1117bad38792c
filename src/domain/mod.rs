pub mod budget;
pub mod credential;
pub mod sheets;

// Re-export commonly used types
pub use budget::*;
pub use credential::Credential;
