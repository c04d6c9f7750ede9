//! Layered configuration.
//!
//! Priority, lowest first: built-in defaults, YAML config file,
//! `CARENAV_`-prefixed environment variables, CLI flags.

use std::path::Path;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "care-navigator.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Backend base URL
    #[arg(long, env = "CARENAV_BASE_URL")]
    pub base_url: Option<String>,

    /// Path the booking cards link to
    #[arg(long, env = "CARENAV_BOOKING_BASE")]
    pub booking_base: Option<String>,

    /// Log output format (text or json)
    #[arg(long, env = "CARENAV_LOG_FORMAT")]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub booking: BookingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub start_path: String,
    pub continue_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            start_path: "/api/chat/start".to_string(),
            continue_path: "/api/chat/continue".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    pub base_path: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_path: "/clinics".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("backend.base_url", defaults.backend.base_url)?
            .set_default("backend.start_path", defaults.backend.start_path)?
            .set_default("backend.continue_path", defaults.backend.continue_path)?
            .set_default("booking.base_path", defaults.booking.base_path)?
            .set_default("logging.format", "text")?;

        // An explicit file must exist; the cwd fallback is optional.
        builder = match cli.config.as_deref() {
            Some(path) => builder.add_source(File::from(Path::new(path)).required(true)),
            None => builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        // E.g. CARENAV_BACKEND__BASE_URL=http://localhost:9000
        builder = builder.add_source(
            Environment::with_prefix("CARENAV")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = cli.base_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(base) = cli.booking_base {
            builder = builder.set_override("booking.base_path", base)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("logging.format", format.to_lowercase())?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        let cfg = Config::builder()
            .set_default("format", "json")
            .unwrap()
            .build()
            .unwrap();
        let logging: LoggingConfig = cfg.try_deserialize().unwrap();
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let cfg = Config::builder()
            .set_default("format", "xml")
            .unwrap()
            .build()
            .unwrap();
        assert!(cfg.try_deserialize::<LoggingConfig>().is_err());
    }
}
