//! Runtime configuration read from the environment (and an optional `.env`).

use log::{info, warn};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub upload_dir: PathBuf,
    pub poll_interval: Duration,
    pub session_max_age_secs: i64,
    pub max_upload_bytes: usize,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, String> {
        let max_upload_mb: usize = try_load("MAX_UPLOAD_MB", "20")?;
        Ok(Self {
            host: try_load("APP_HOST", "127.0.0.1")?,
            port: try_load("APP_PORT", "8080")?,
            database_path: try_load("DATABASE_PATH", "entradas.sqlite")?,
            upload_dir: PathBuf::from(try_load::<String>("UPLOAD_DIR", "uploads")?),
            poll_interval: Duration::from_secs(try_load("DASHBOARD_POLL_SECS", "3")?),
            session_max_age_secs: try_load("SESSION_MAX_AGE_SECS", "43200")?,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            admin_username: optional("ADMIN_USERNAME"),
            admin_password: optional("ADMIN_PASSWORD"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: "entradas.sqlite".to_string(),
            upload_dir: PathBuf::from("uploads"),
            poll_interval: Duration::from_secs(3),
            session_max_age_secs: 43_200,
            max_upload_bytes: 20 * 1024 * 1024,
            admin_username: None,
            admin_password: None,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        format!("Invalid value for {key}: {e}")
    })
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
