use std::time::Duration;

use tracing::warn;

pub const API_URL_ENV: &str = "LOAN_DASHBOARD_API_URL";
pub const TIMEOUT_ENV: &str = "LOAN_DASHBOARD_TIMEOUT_SECS";
pub const RENDER_TIMEOUT_ENV: &str = "LOAN_DASHBOARD_RENDER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// JSON data queries.
    pub timeout: Duration,
    /// Server-rendered images, which can take much longer.
    pub render_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:5001".to_string(),
            timeout: Duration::from_secs(15),
            render_timeout: Duration::from_secs(60),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(timeout) = seconds(&lookup, TIMEOUT_ENV) {
            config.timeout = timeout;
        }
        if let Some(timeout) = seconds(&lookup, RENDER_TIMEOUT_ENV) {
            config.render_timeout = timeout;
        }
        config
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<Duration> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!(variable = name, value = %raw, "ignoring invalid timeout override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_and_invalid_values_are_ignored() {
        let config = ApiConfig::from_lookup(|name| match name {
            API_URL_ENV => Some("http://10.0.0.5:8000/".to_string()),
            TIMEOUT_ENV => Some("30".to_string()),
            RENDER_TIMEOUT_ENV => Some("soon".to_string()),
            _ => None,
        });

        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.render_timeout, Duration::from_secs(60));
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(ApiConfig::from_lookup(|_| None), ApiConfig::default());
    }
}
