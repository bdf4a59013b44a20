use std::env;
use std::time::Duration;

use accord_application::{DEFAULT_REVEAL_STAGGER, StaleResponsePolicy};
use accord_core::{AppError, AppResult};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub reveal_stagger: Duration,
    pub stale_policy: StaleResponsePolicy,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_base_url = lookup("ACCORD_API_BASE_URL")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let http_timeout_secs = parse_u64(
            &lookup,
            "ACCORD_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        let stagger_ms = match lookup("ACCORD_STAGGER_MS") {
            Some(_) => parse_u64(&lookup, "ACCORD_STAGGER_MS", 0)?,
            None => u64::try_from(DEFAULT_REVEAL_STAGGER.as_millis()).unwrap_or(u64::MAX),
        };
        let stale_policy = match lookup("ACCORD_STALE_RESPONSES") {
            Some(value) => value.parse::<StaleResponsePolicy>()?,
            None => StaleResponsePolicy::default(),
        };

        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "ACCORD_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            reveal_stagger: Duration::from_millis(stagger_ms),
            stale_policy,
        })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> AppResult<u64> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
