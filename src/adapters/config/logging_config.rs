#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file written next to the stderr output. Empty disables it.
    pub file: Box<str>,
    /// Level for this crate's events: error, warn, info, debug or trace.
    pub level: Box<str>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "auto_budget.log".into(),
            level: "debug".into(),
        }
    }
}
