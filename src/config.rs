use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default request timeout when `RISKDB_TIMEOUT_SECS` is not set.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the risk-database backend API.
    pub api_url: String,
    /// Bearer token presented on every backend request.
    pub api_key: String,
    /// Timeout applied to each backend request.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url =
            env::var("RISKDB_API_URL").context("RISKDB_API_URL environment variable is required")?;

        let api_key =
            env::var("RISKDB_API_KEY").context("RISKDB_API_KEY environment variable is required")?;

        let request_timeout = parse_timeout_secs(env::var("RISKDB_TIMEOUT_SECS").ok())?;

        Ok(Config {
            api_url,
            api_key,
            request_timeout,
        })
    }
}

/// Parse RISKDB_TIMEOUT_SECS from an optional string value.
///
/// Missing or blank values fall back to the default; a present value must
/// parse as a whole number of seconds.
pub fn parse_timeout_secs(value: Option<String>) -> Result<Duration> {
    match value.filter(|s| !s.trim().is_empty()) {
        None => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .context("RISKDB_TIMEOUT_SECS must be a valid number of seconds")?;
            Ok(Duration::from_secs(secs))
        }
    }
}
