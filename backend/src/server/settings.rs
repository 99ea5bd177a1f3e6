//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CRUDHUB_*` environment variables or a
//! configuration file; anything left unset falls back to the defaults below.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use chrono::TimeDelta;
use crudhub::domain::TokenLifetimes;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_NLU_DATA_PATH: &str = "static/test.json";
const DEFAULT_UPLOAD_ROOT: &str = "data";

/// Startup configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRUDHUB")]
pub struct AppSettings {
    /// Address the listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; when absent every repository is held in memory.
    pub database_url: Option<String>,
    /// JSON document holding the NLU training examples.
    pub nlu_data_path: Option<PathBuf>,
    /// Directory receiving uploaded files.
    pub upload_root: Option<PathBuf>,
    /// Lifetime of tokens issued by the password flow.
    pub bearer_token_minutes: Option<i64>,
    /// Lifetime of the `token` cookie.
    pub access_token_hours: Option<i64>,
    /// Lifetime of the `refresh_token` cookie.
    pub refresh_token_days: Option<i64>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{name} must be a positive number, got {value}")]
    InvalidLifetime { name: &'static str, value: i64 },
    #[error("{name} must be valid UTF-8: {path}")]
    NonUtf8Path { name: &'static str, path: String },
}

fn lifetime(
    name: &'static str,
    configured: Option<i64>,
    fallback: TimeDelta,
    to_delta: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta, SettingsError> {
    match configured {
        None => Ok(fallback),
        Some(value) if value > 0 => {
            to_delta(value).ok_or(SettingsError::InvalidLifetime { name, value })
        }
        Some(value) => Err(SettingsError::InvalidLifetime { name, value }),
    }
}

fn utf8_path(name: &'static str, path: PathBuf) -> Result<camino::Utf8PathBuf, SettingsError> {
    camino::Utf8PathBuf::from_path_buf(path).map_err(|raw| SettingsError::NonUtf8Path {
        name,
        path: raw.to_string_lossy().into_owned(),
    })
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn nlu_data_path(&self) -> Result<camino::Utf8PathBuf, SettingsError> {
        utf8_path(
            "nlu_data_path",
            self.nlu_data_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_NLU_DATA_PATH)),
        )
    }

    pub fn upload_root(&self) -> Result<camino::Utf8PathBuf, SettingsError> {
        utf8_path(
            "upload_root",
            self.upload_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_ROOT)),
        )
    }

    /// Token lifetimes with any configured overrides applied.
    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, SettingsError> {
        let defaults = TokenLifetimes::default();
        Ok(TokenLifetimes {
            bearer: lifetime(
                "bearer_token_minutes",
                self.bearer_token_minutes,
                defaults.bearer,
                TimeDelta::try_minutes,
            )?,
            cookie_access: lifetime(
                "access_token_hours",
                self.access_token_hours,
                defaults.cookie_access,
                TimeDelta::try_hours,
            )?,
            refresh: lifetime(
                "refresh_token_days",
                self.refresh_token_days,
                defaults.refresh,
                TimeDelta::try_days,
            )?,
        })
    }
}
