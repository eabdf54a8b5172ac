use config::Config;
use error_stack::{report, ResultExt};
use serde::{de::IntoDeserializer, Deserialize};
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::sheets_config::SpreadsheetConfig;

pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const DEFAULT_CREDENTIALS: &str = "./credentials.json";
pub const DEFAULT_TOKEN_CACHE: &str = "./token.json";
const ENV_PREFIX: &str = "UCI";

/// Settings that rarely change between runs. Every key is optional; command
/// line flags win over the file, the file wins over built-in defaults.
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub credentials: Option<String>,
    pub token_cache: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("[CONFIG ERROR] Error reading config file '{0}'")]
    Read(String),
    #[error("[CONFIG ERROR] Failed to deserialize config file '{0}'")]
    Deserialize(String),
}

impl AppConfig {
    /// Loads `Config.{toml,yaml,json,...}` from the working directory, or the
    /// file named by `CONFIG_PATH`, merged with `UCI_*` environment variables.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, AppConfigError> {
        let value = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<serde_json::Value>())
            .change_context_lazy(|| AppConfigError::Read(config_path.to_string()))?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        match AppConfig::deserialize(path_de) {
            Ok(app_config) => Ok(app_config),
            Err(e) => {
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
                Err(report!(AppConfigError::Deserialize(config_path.to_string())))
                    .attach_printable(e.to_string())
                    .attach_printable(format!(
                        "Field path: {}",
                        path_str.trim_start_matches('.')
                    ))
            }
        }
    }

    pub fn spreadsheet_config(
        &self,
        spreadsheet_id: &str,
        credentials: Option<&str>,
        token_cache: Option<&str>,
    ) -> SpreadsheetConfig {
        SpreadsheetConfig {
            spreadsheet_id: spreadsheet_id.into(),
            credentials: credentials
                .or(self.credentials.as_deref())
                .unwrap_or(DEFAULT_CREDENTIALS)
                .into(),
            token_cache: token_cache
                .or(self.token_cache.as_deref())
                .unwrap_or(DEFAULT_TOKEN_CACHE)
                .into(),
        }
    }
}
