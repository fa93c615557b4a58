//! Application configuration.
//!
//! Layered with the following priority (highest first):
//! 1. Environment variables (`TASK_REMINDER_*`)
//! 2. TOML config file (`TASK_REMINDER_CONFIG`, or `config.toml` in the
//!    platform config directory)
//! 3. Compiled defaults

use std::path::{Path, PathBuf};

use chrono::Duration;
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_CONFIG_PATH: &str = "TASK_REMINDER_CONFIG";
pub const ENV_BIND_ADDR: &str = "TASK_REMINDER_BIND";
pub const ENV_DATABASE_PATH: &str = "TASK_REMINDER_DB";
pub const ENV_TIMEZONE: &str = "TASK_REMINDER_TZ";
pub const ENV_LOG_LEVEL: &str = "TASK_REMINDER_LOG";

/// Ten years.
pub const MAX_SESSION_TTL_HOURS: i64 = 10 * 365 * 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("unknown time zone {0:?}: {1}")]
    Timezone(String, String),

    #[error("session_ttl_hours must be between 1 and {}, got {0}", MAX_SESSION_TTL_HOURS)]
    SessionTtl(i64),
}

/// `config.toml` contents. Every field is optional so a file can override
/// just the values it cares about.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerSection,
    storage: StorageSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
    timezone: Option<String>,
    session_ttl_hours: Option<i64>,
    log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
    database_path: Option<PathBuf>,
}

/// Values taken from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub config_path: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub database_path: Option<PathBuf>,
    pub timezone: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            config_path: var(ENV_CONFIG_PATH).map(PathBuf::from),
            bind_addr: var(ENV_BIND_ADDR),
            database_path: var(ENV_DATABASE_PATH).map(PathBuf::from),
            timezone: var(ENV_TIMEZONE),
            log_level: var(ENV_LOG_LEVEL),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite file holding users, tasks and sessions.
    pub database_path: PathBuf,
    /// Zone used to read deadlines submitted without an offset.
    pub timezone: Tz,
    /// How long a login stays valid.
    pub session_ttl_hours: i64,
    /// Default `env_logger` filter; `RUST_LOG` still wins.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            database_path: default_database_path(),
            timezone: chrono_tz::UTC,
            session_ttl_hours: 24,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment and the config file it points to.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&EnvOverrides::from_env())
    }

    /// Load using explicit overrides.
    ///
    /// An explicitly named config file must exist; the default location may
    /// be missing.
    pub fn load_with(env: &EnvOverrides) -> Result<Self, ConfigError> {
        let file = load_config_file(env.config_path.as_deref())?;
        Self::resolve(env, &file)
    }

    /// Session lifetime. Values beyond what `Duration` holds saturate
    /// instead of panicking; `resolve` never produces them.
    pub fn session_ttl(&self) -> Duration {
        Duration::try_hours(self.session_ttl_hours).unwrap_or(Duration::MAX)
    }

    /// Priority: environment > file > default.
    fn resolve(env: &EnvOverrides, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timezone = match env.timezone.as_ref().or(file.server.timezone.as_ref()) {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| ConfigError::Timezone(name.clone(), e.to_string()))?,
            None => defaults.timezone,
        };

        let session_ttl_hours = file
            .server
            .session_ttl_hours
            .unwrap_or(defaults.session_ttl_hours);
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::SessionTtl(session_ttl_hours));
        }

        Ok(Self {
            bind_addr: env
                .bind_addr
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            database_path: env
                .database_path
                .clone()
                .or_else(|| file.storage.database_path.clone())
                .unwrap_or(defaults.database_path),
            timezone,
            session_ttl_hours,
            log_level: env
                .log_level
                .clone()
                .or_else(|| file.server.log_level.clone())
                .unwrap_or(defaults.log_level),
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "TaskReminder", "TaskReminder")
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("tasks.db"))
        .unwrap_or_else(|| PathBuf::from("tasks.db"))
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(dirs) = project_dirs() else {
        return Ok(ConfigFile::default());
    };
    let path = dirs.config_dir().join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
