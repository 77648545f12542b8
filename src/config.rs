//! Per-deployment client configuration.
//!
//! The deployment and any overrides are read at build time (`option_env!`),
//! since a WASM bundle has no process environment at runtime:
//!
//! - `SACCO_ENV`: `development` (default), `staging`, or `production`
//! - `SACCO_API_URL`: backend base URL, trailing `/` trimmed
//! - `SACCO_API_TIMEOUT_MS`: per-request timeout
//! - `SACCO_MAX_RETRY_ATTEMPTS`: retries for transient failures
//! - `SACCO_ENABLE_LOGGING`: `true`/`false`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEV_API_URL: &str = "http://localhost:8002/api/v1";
pub const HOSTED_API_URL: &str = "https://sacco-banking-latest.onrender.com/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown SACCO_ENV: {0} (expected development, staging, or production)")]
    UnknownDeployment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub deployment: Deployment,
    pub app_name: String,
    pub version: String,
    pub api_url: String,
    pub api_timeout: Duration,
    pub max_retry_attempts: u32,
    pub enable_logging: bool,
    pub production: bool,
}

impl AppConfig {
    /// Preset values for a deployment, before overrides.
    #[must_use]
    pub fn for_deployment(deployment: Deployment) -> Self {
        match deployment {
            Deployment::Development => Self {
                deployment,
                app_name: "SACCO Banking Dev".to_owned(),
                version: "1.0.0-dev".to_owned(),
                api_url: DEV_API_URL.to_owned(),
                api_timeout: Duration::from_millis(10_000),
                max_retry_attempts: 1,
                enable_logging: true,
                production: false,
            },
            Deployment::Staging => Self {
                deployment,
                app_name: "SACCO Banking Staging".to_owned(),
                version: "1.0.0-staging".to_owned(),
                api_url: HOSTED_API_URL.to_owned(),
                api_timeout: Duration::from_millis(30_000),
                max_retry_attempts: 2,
                enable_logging: true,
                production: false,
            },
            Deployment::Production => Self {
                deployment,
                app_name: "SACCO Banking".to_owned(),
                version: "1.0.0".to_owned(),
                api_url: HOSTED_API_URL.to_owned(),
                api_timeout: Duration::from_millis(30_000),
                max_retry_attempts: 2,
                enable_logging: false,
                production: true,
            },
        }
    }

    /// Build from variables captured when the bundle was compiled.
    ///
    /// # Errors
    ///
    /// Returns an error if `SACCO_ENV` names an unknown deployment.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "SACCO_ENV" => option_env!("SACCO_ENV"),
                "SACCO_API_URL" => option_env!("SACCO_API_URL"),
                "SACCO_API_TIMEOUT_MS" => option_env!("SACCO_API_TIMEOUT_MS"),
                "SACCO_MAX_RETRY_ATTEMPTS" => option_env!("SACCO_MAX_RETRY_ATTEMPTS"),
                "SACCO_ENABLE_LOGGING" => option_env!("SACCO_ENABLE_LOGGING"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build from an arbitrary key lookup. Unparseable numeric or boolean
    /// overrides fall back to the preset.
    ///
    /// # Errors
    ///
    /// Returns an error if `SACCO_ENV` names an unknown deployment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let deployment = parse_deployment(lookup("SACCO_ENV").as_deref())?;
        let mut config = Self::for_deployment(deployment);

        if let Some(url) = lookup("SACCO_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().trim_end_matches('/').to_owned();
        }
        let timeout_ms = u64::try_from(config.api_timeout.as_millis()).unwrap_or(u64::MAX);
        config.api_timeout = Duration::from_millis(parse_or(lookup("SACCO_API_TIMEOUT_MS"), timeout_ms));
        config.max_retry_attempts = parse_or(lookup("SACCO_MAX_RETRY_ATTEMPTS"), config.max_retry_attempts);
        config.enable_logging = parse_or(lookup("SACCO_ENABLE_LOGGING"), config.enable_logging);

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_deployment(Deployment::Development)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

fn parse_deployment(raw: Option<&str>) -> Result<Deployment, ConfigError> {
    match raw.map(str::trim).unwrap_or("development") {
        "development" | "dev" => Ok(Deployment::Development),
        "staging" => Ok(Deployment::Staging),
        "production" | "prod" => Ok(Deployment::Production),
        other => Err(ConfigError::UnknownDeployment(other.to_owned())),
    }
}
