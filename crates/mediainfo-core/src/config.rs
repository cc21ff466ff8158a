//! Configuration module
//!
//! Reads the step's settings from the environment (after loading `.env` when
//! present). Every setting has a default, so an empty environment is valid.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const DEFAULT_LOG_FILTER: &str = "mediainfo=info,mediainfo_core=info,mediainfo_cli=info";
const DEFAULT_ENVIRONMENT: &str = "development";

/// What the handler does after substituting fallback values for a failed event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the error together with the fallback record.
    #[default]
    Propagate,
    /// Log the error and return the fallback record as a success.
    Fallback,
}

impl Display for ErrorPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ErrorPolicy::Propagate => write!(f, "propagate"),
            ErrorPolicy::Fallback => write!(f, "fallback"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "propagate" => Ok(ErrorPolicy::Propagate),
            "fallback" => Ok(ErrorPolicy::Fallback),
            _ => Err(anyhow::anyhow!("Invalid error policy: {}", s)),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MediaInfoConfig {
    pub error_policy: ErrorPolicy,
    pub log_format: LogFormat,
    /// `EnvFilter` directives used when RUST_LOG is unset
    pub log_filter: String,
    pub environment: String,
}

impl Default for MediaInfoConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            log_format: LogFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl MediaInfoConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let error_policy = match lookup("MEDIAINFO_ERROR_POLICY") {
            Some(value) => value.parse()?,
            None => ErrorPolicy::default(),
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let config = Self {
            error_policy,
            log_format,
            log_filter,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check if the step is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    /// Log format after applying the production override.
    pub fn effective_log_format(&self) -> LogFormat {
        if self.is_production() {
            LogFormat::Json
        } else {
            self.log_format
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.log_filter.trim().is_empty() {
            return Err(anyhow::anyhow!("RUST_LOG cannot be empty"));
        }

        if self.environment.trim().is_empty() {
            return Err(anyhow::anyhow!("ENVIRONMENT cannot be empty"));
        }

        Ok(())
    }
}
