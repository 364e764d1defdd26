//! Environment-driven configuration.
//!
//! ## Environment Variables
//! - `PORT` - port to listen on (default: `3000`)
//! - `BIND_ADDR` - interface to bind (default: `0.0.0.0`)
//! - `SHEET_NAME` - sheet holding the tweet queue (default: `Tweets`)
//! - `STORE_BACKEND` - `memory` or `google` (default: `memory`)
//! - `SPREADSHEET_ID`, `GOOGLE_SHEETS_ACCESS_TOKEN` - required for `google`
//! - `SHEETS_API_BASE` - Sheets endpoint (default: `https://sheets.googleapis.com`)
//! - `SHEETS_TIMEOUT_SECS` - Sheets request timeout (default: `30`)
//! - `DISPLAY_TIMEZONE` - IANA zone used for response timestamps (default: `Asia/Kolkata`)
//! - `STRICT_STATUS_CODES` - map error envelopes to 4xx/5xx (default: `false`)
//! - `SEED_SAMPLE_DATA` - seed the memory backend with sample rows (default: `false`)

use chrono_tz::Tz;
use thiserror::Error;

use crate::constants::{
    DEFAULT_DISPLAY_TIMEZONE, DEFAULT_SHEET_NAME, DEFAULT_SHEETS_API_BASE,
    DEFAULT_SHEETS_TIMEOUT_SECS,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoogleSheetsSettings {
    pub spreadsheet_id: String,
    pub access_token: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    Google(GoogleSheetsSettings),
}

/// Settings the gateway itself needs, independent of transport and storage
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub sheet_name: String,
    pub display_timezone: Tz,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            display_timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub gateway: GatewayConfig,
    pub backend: StoreBackend,
    pub strict_status_codes: bool,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => 3000,
        };
        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());

        let sheet_name = var("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        let tz_name =
            var("DISPLAY_TIMEZONE").unwrap_or_else(|| DEFAULT_DISPLAY_TIMEZONE.to_string());
        let display_timezone = tz_name.parse::<Tz>().map_err(|e| {
            ConfigError::Invalid {
                key: "DISPLAY_TIMEZONE",
                value: tz_name.clone(),
                reason: e.to_string(),
            }
        })?;

        let backend = match var("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory,
            "google" => StoreBackend::Google(GoogleSheetsSettings {
                spreadsheet_id: var("SPREADSHEET_ID").ok_or(ConfigError::Missing("SPREADSHEET_ID"))?,
                access_token: var("GOOGLE_SHEETS_ACCESS_TOKEN")
                    .ok_or(ConfigError::Missing("GOOGLE_SHEETS_ACCESS_TOKEN"))?,
                api_base: var("SHEETS_API_BASE")
                    .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
                timeout_secs: match var("SHEETS_TIMEOUT_SECS") {
                    Some(v) => parse_number("SHEETS_TIMEOUT_SECS", &v)?,
                    None => DEFAULT_SHEETS_TIMEOUT_SECS,
                },
            }),
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: other.to_string(),
                    reason: "expected `memory` or `google`".to_string(),
                });
            }
        };

        Ok(Self {
            bind_addr,
            port,
            gateway: GatewayConfig {
                sheet_name,
                display_timezone,
            },
            backend,
            strict_status_codes: parse_flag("STRICT_STATUS_CODES", var("STRICT_STATUS_CODES"))?,
            seed_sample_data: parse_flag("SEED_SAMPLE_DATA", var("SEED_SAMPLE_DATA"))?,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            StoreBackend::Memory => "memory",
            StoreBackend::Google(_) => "google",
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.backend, StoreBackend::Memory);
        assert!(!config.strict_status_codes);
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn test_google_backend_requires_credentials() {
        assert_eq!(
            config_from(&[("STORE_BACKEND", "google")]).unwrap_err(),
            ConfigError::Missing("SPREADSHEET_ID")
        );

        let config = config_from(&[
            ("STORE_BACKEND", "google"),
            ("SPREADSHEET_ID", "abc"),
            ("GOOGLE_SHEETS_ACCESS_TOKEN", "ya29.token"),
            ("SHEETS_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(
            config.backend,
            StoreBackend::Google(GoogleSheetsSettings {
                spreadsheet_id: "abc".into(),
                access_token: "ya29.token".into(),
                api_base: DEFAULT_SHEETS_API_BASE.into(),
                timeout_secs: 5,
            })
        );
    }

    #[test]
    fn test_overrides_and_flags() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("SHEET_NAME", "Queue"),
            ("DISPLAY_TIMEZONE", "Europe/Berlin"),
            ("STRICT_STATUS_CODES", "TRUE"),
            ("SEED_SAMPLE_DATA", "1"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.gateway.sheet_name, "Queue");
        assert_eq!(config.gateway.display_timezone, chrono_tz::Europe::Berlin);
        assert!(config.strict_status_codes);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("DISPLAY_TIMEZONE", "Mars/Olympus")]),
            Err(ConfigError::Invalid {
                key: "DISPLAY_TIMEZONE",
                ..
            })
        ));
        assert!(matches!(
            config_from(&[("STORE_BACKEND", "postgres")]),
            Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                ..
            })
        ));
        assert!(matches!(
            config_from(&[("STRICT_STATUS_CODES", "maybe")]),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
