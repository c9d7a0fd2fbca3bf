//! Runtime configuration.
//!
//! # Responsibility
//! - Describe session store, logging and field-limit settings.
//! - Load them from an optional TOML file, then apply `ASSISTANT_*`
//!   environment overrides.
//!
//! # Invariants
//! - Every section has defaults, so an empty file is a valid config.
//! - `load` only returns configs that passed `validate`.

use crate::logging::{default_log_level, normalize_level};
use crate::validation::{ValidationLimits, DEFAULT_NAME_MAX_CHARS, DEFAULT_TITLE_MAX_CHARS};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_SESSION_STORE: &str = "ASSISTANT_SESSION_STORE";
pub const ENV_DB_PATH: &str = "ASSISTANT_DB_PATH";
pub const ENV_SESSION_MAX_AGE_DAYS: &str = "ASSISTANT_SESSION_MAX_AGE_DAYS";
pub const ENV_LOG_LEVEL: &str = "ASSISTANT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ASSISTANT_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "assistant_sessions.sqlite3";
const DEFAULT_SESSION_MAX_AGE_DAYS: u64 = 31;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    InvalidValue {
        key: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::InvalidValue { key, message } => {
                write!(f, "invalid config value for `{key}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Session store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub store: StoreKind,
    /// Used when `store = "sqlite"`.
    pub db_path: PathBuf,
    pub max_age_days: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::Memory,
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            max_age_days: DEFAULT_SESSION_MAX_AGE_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Absolute directory for rotating log files; stderr when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub title_max: usize,
    pub name_max: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            title_max: DEFAULT_TITLE_MAX_CHARS,
            name_max: DEFAULT_NAME_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub session: SessionConfig,
    pub log: LogConfig,
    pub limits: LimitsConfig,
}

impl AssistantConfig {
    /// Loads the optional file, applies process environment overrides and
    /// validates the result.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies `ASSISTANT_*` overrides read through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<()> {
        if let Some(value) = lookup(ENV_SESSION_STORE) {
            self.session.store = match value.trim().to_ascii_lowercase().as_str() {
                "memory" => StoreKind::Memory,
                "sqlite" => StoreKind::Sqlite,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_SESSION_STORE,
                        message: format!("expected memory|sqlite, got `{other}`"),
                    })
                }
            };
        }
        if let Some(value) = lookup(ENV_DB_PATH) {
            self.session.db_path = PathBuf::from(value.trim());
        }
        if let Some(value) = lookup(ENV_SESSION_MAX_AGE_DAYS) {
            self.session.max_age_days =
                value
                    .trim()
                    .parse()
                    .map_err(|err| ConfigError::InvalidValue {
                        key: ENV_SESSION_MAX_AGE_DAYS,
                        message: format!("`{value}` is not a day count: {err}"),
                    })?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log.level = value;
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            let trimmed = value.trim();
            self.log.dir = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.session.max_age_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.max_age_days",
                message: "must be at least 1".to_string(),
            });
        }
        if self.session.store == StoreKind::Sqlite
            && self.session.db_path.as_os_str().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                key: "session.db_path",
                message: "must not be empty for the sqlite store".to_string(),
            });
        }
        normalize_level(&self.log.level).map_err(|err| ConfigError::InvalidValue {
            key: "log.level",
            message: err.to_string(),
        })?;
        if let Some(dir) = &self.log.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: "log.dir",
                    message: format!("must be absolute, got `{}`", dir.display()),
                });
            }
        }
        if self.limits.title_max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "limits.title_max",
                message: "must be at least 1".to_string(),
            });
        }
        if self.limits.name_max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "limits.name_max",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session.max_age_days.saturating_mul(SECONDS_PER_DAY))
    }

    pub fn validation_limits(&self) -> ValidationLimits {
        ValidationLimits {
            title_max_chars: self.limits.title_max,
            name_max_chars: self.limits.name_max,
        }
    }
}
