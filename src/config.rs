// src/config.rs
use crate::policy::EditorAllowList;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Web server settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub sqlite_path: PathBuf,
    pub schema_path: PathBuf,
    pub editors: EditorAllowList,
}

/// Credentials for the hosted auth/database service, used by operator tools only.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    pub base_url: url::Url,
    pub service_role_key: String,
}

/// Loads `.env` if present. Real environment variables win.
pub fn load_dotenv() {
    report_dotenv(dotenvy::dotenv());
}

/// A missing file is normal; anything else (unreadable, malformed) is logged.
/// Returns whether a warning was emitted.
fn report_dotenv<T>(res: dotenvy::Result<T>) -> bool {
    match res {
        Err(e) if !e.not_found() => {
            warn!(error = %e, "ignoring .env file");
            true
        }
        _ => false,
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            name: "BIND_ADDR",
            reason: format!("{e}"),
        })?;

        Ok(Self {
            bind_addr,
            sqlite_path: get("SQLITE_PATH")
                .unwrap_or_else(|| "apartments.sqlite3".to_string())
                .into(),
            schema_path: get("SCHEMA_PATH")
                .unwrap_or_else(|| "sql/schema.sql".to_string())
                .into(),
            editors: EditorAllowList::parse(&get("APARTMENT_EDITORS").unwrap_or_default()),
        })
    }
}

impl HostedConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = required(&get, "HOSTED_URL")?;
        let base_url = url::Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            name: "HOSTED_URL",
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            service_role_key: required(&get, "HOSTED_SERVICE_ROLE_KEY")?,
        })
    }
}

pub fn required(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    get(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}
