use config::Config;
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "AUTO_BUDGET";

#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub sheets: super::sheets_config::SpreadsheetConfig,
    pub auth: super::auth_config::AuthConfig,
    pub logging: super::logging_config::LoggingConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Failed to deserialize config file '{0}'")]
    Deserialize(String),
}

impl AppConfig {
    /// Loads the file named by `CONFIG_PATH` (default `Config`, any supported extension), then
    /// `AUTO_BUDGET_*` environment variables, e.g. `AUTO_BUDGET_SHEETS__SHEET_NAME`.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .change_context_lazy(|| ConfigError::Read(config_path.to_string()))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| ConfigError::Read(config_path.to_string()))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(ConfigError::Deserialize(config_path.to_string()))
                .attach_printable(format!("{e}"))
                .attach_printable(format!("Field path: {}", path_str.trim_start_matches('.')))
        })
    }
}
