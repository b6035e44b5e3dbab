use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const URL_VAR: &str = "RENTAL_BACKEND_URL";
pub const KEY_VAR: &str = "RENTAL_BACKEND_KEY";
pub const TABLE_VAR: &str = "RENTAL_BACKEND_TABLE";
pub const TIMEOUT_VAR: &str = "RENTAL_BACKEND_TIMEOUT_SECS";

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL, without the `/rest/v1` suffix
    pub base_url: String,
    /// Anonymous or service API key
    pub api_key: String,
    /// Table holding property rows
    pub table: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: "properties".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, reporting every missing
    /// required variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| is_set(value));

        let url = read(URL_VAR);
        let key = read(KEY_VAR);

        let missing: Vec<&str> = [(URL_VAR, url.is_none()), (KEY_VAR, key.is_none())]
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            bail!("Missing required environment variables: {}", missing.join(", "));
        }

        let mut config = Self::new(url.unwrap_or_default(), key.unwrap_or_default());

        if let Some(table) = read(TABLE_VAR) {
            config.table = table;
        }
        if let Some(timeout) = read(TIMEOUT_VAR) {
            let secs: u64 = timeout
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_VAR))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// REST endpoint of the property table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

/// Empty values and unexpanded `${...}` placeholders count as unset.
fn is_set(value: &str) -> bool {
    !value.trim().is_empty() && !value.contains("${")
}
