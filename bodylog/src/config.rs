//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: BODYLOG_, nested keys separated by `__`)
//! 2. The TOML file passed to [`Config::load_from`], or ./config.toml for [`Config::load`]
//! 3. Default values
//!
//! The body format is read once at startup and never reloaded.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::Result;

const ENV_PREFIX: &str = "BODYLOG_";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Request/response logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_name")]
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// How request and response bodies appear in call logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    /// Bodies are always logged as `{}`
    ///
    /// Applies to every payload, including ones that could be encoded.
    #[default]
    Suppressed,
    /// Bodies are logged as compact JSON when the payload supports it
    Structured,
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suppressed => f.write_str("suppressed"),
            Self::Structured => f.write_str("structured"),
        }
    }
}

/// Request/response logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub body_format: BodyFormat,
}

fn default_name() -> String {
    "bodylog".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from ./config.toml (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and the environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
        }

        let config = Self::figment(Toml::file(path)).extract()?;
        Ok(config)
    }

    fn figment(file: impl figment::Provider) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
            // Environment variables have highest priority
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
