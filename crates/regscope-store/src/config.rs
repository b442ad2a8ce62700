use std::fmt;
use std::time::Duration;

use crate::StoreError;

/// Table holding one row per tracked bill.
pub const DEFAULT_TABLE: &str = "state_bill_entries";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const TABLE_VAR: &str = "REGSCOPE_TABLE";
pub const TIMEOUT_VAR: &str = "REGSCOPE_TIMEOUT_SECS";

/// Connection settings for the hosted store.
///
/// Construction fails when the URL or the service credential is absent, so
/// holding a `StoreConfig` means a request can at least be attempted.
#[derive(Clone)]
pub struct StoreConfig {
    pub url: String,
    pub service_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Build from the two required settings. Blank values count as missing.
    pub fn new(url: Option<String>, service_key: Option<String>) -> Result<Self, StoreError> {
        let url = url.filter(|u| !u.trim().is_empty());
        let service_key = service_key.filter(|k| !k.trim().is_empty());
        match (url, service_key) {
            (Some(url), Some(service_key)) => Ok(Self {
                url: url.trim().trim_end_matches('/').to_string(),
                service_key: service_key.trim().to_string(),
                table: DEFAULT_TABLE.to_string(),
                timeout: DEFAULT_TIMEOUT,
            }),
            (url, key) => Err(StoreError::MissingConfig {
                has_url: url.is_some(),
                has_key: key.is_some(),
            }),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// An unparseable timeout falls back to [`DEFAULT_TIMEOUT`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(URL_VAR), lookup(KEY_VAR))?;
        if let Some(table) = lookup(TABLE_VAR).filter(|t| !t.trim().is_empty()) {
            config.table = table.trim().to_string();
        }
        if let Some(secs) = lookup(TIMEOUT_VAR).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn both_required_settings_present() {
        let config = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "https://abc.supabase.co/"),
            (KEY_VAR, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = StoreConfig::from_lookup(lookup(&[(URL_VAR, "https://abc.supabase.co")]))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingConfig {
                has_url: true,
                has_key: false
            }
        ));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = StoreConfig::new(Some("  ".into()), Some(String::new())).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingConfig {
                has_url: false,
                has_key: false
            }
        ));
    }

    #[test]
    fn optional_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "http://localhost:54321"),
            (KEY_VAR, "secret"),
            (TABLE_VAR, "bills_2025"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.table, "bills_2025");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = StoreConfig::from_lookup(lookup(&[
            (URL_VAR, "http://localhost:54321"),
            (KEY_VAR, "secret"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn debug_redacts_key() {
        let config =
            StoreConfig::new(Some("http://localhost".into()), Some("s3cr3t".into())).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn error_message_does_not_carry_values() {
        let err = StoreConfig::new(Some("http://localhost".into()), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing store credentials (url set: true, key set: false)"
        );
    }
}
