//! Layered application configuration.
//!
//! # Responsibility
//! - Externalize the storage target and logging options that earlier
//!   revisions hard-coded next to the queries.
//! - Merge built-in defaults, an optional `bookshelf.toml`, and
//!   `BOOKSHELF_*` environment overrides, in that order.
//!
//! # Invariants
//! - Loading succeeds with no file and no environment set (pure defaults).
//! - Later layers win key-by-key; environment beats file beats defaults.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "bookshelf.toml";

/// Prefix for environment overrides, e.g. `BOOKSHELF_STORE_DATABASE`.
pub const ENV_PREFIX: &str = "BOOKSHELF_";

/// Database name selecting a throwaway in-memory store.
pub const MEMORY_DATABASE: &str = ":memory:";

const DEFAULT_DATABASE_FILE: &str = "bookshelf.db";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Load(figment::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Load(value)
    }
}

/// Storage target options.
///
/// The recognized option set covers server-backed engines as well; the
/// embedded SQLite engine consumes `database` (a file path, or
/// [`MEMORY_DATABASE`]) and leaves the server-only options unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Server host; unused by the embedded engine.
    pub host: Option<String>,
    /// Server port; unused by the embedded engine.
    pub port: Option<u16>,
    /// Database name; the embedded engine treats it as the file path.
    pub database: String,
    /// Server account name; unused by the embedded engine.
    pub user: Option<String>,
    /// Server account password; unused by the embedded engine.
    pub password: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            database: DEFAULT_DATABASE_FILE.to_string(),
            user: None,
            password: None,
        }
    }
}

impl StoreConfig {
    /// Returns whether the target is the throwaway in-memory store.
    pub fn is_in_memory(&self) -> bool {
        self.database == MEMORY_DATABASE
    }

    /// Returns whether any server-only option is set.
    pub fn has_server_options(&self) -> bool {
        self.host.is_some() || self.port.is_some() || self.user.is_some() || self.password.is_some()
    }
}

/// Logging bootstrap options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level: one of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files; a per-user temp directory
    /// is chosen when unset.
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Root configuration for all surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from defaults, `bookshelf.toml`, and environment.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads configuration with an explicit file path (absent files are
    /// simply skipped, leaving defaults and environment in effect).
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
            .extract()?;

        if config.store.has_server_options() {
            // The embedded engine must not swallow a credential that was
            // clearly meant for a server target.
            warn!(
                "event=config_load module=config status=ok unused_server_options=true database={}",
                config.store.database
            );
        }

        Ok(config)
    }
}
