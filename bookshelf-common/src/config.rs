//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default catalog API endpoint (Google Books volumes API)
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://www.googleapis.com/books/v1";

/// Default bind address for the web service
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Default session lifetime in hours (7 days)
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;

/// Optional TOML configuration file contents
///
/// Looked up at `~/.config/bookshelf/config.toml` (or the platform
/// equivalent). Every field is optional; missing fields fall back to
/// environment variables and compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<String>,
    pub bind_addr: Option<String>,
    pub catalog_base_url: Option<String>,
    pub session_ttl_hours: Option<i64>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding bookshelf.db
    pub data_dir: PathBuf,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Base URL of the external book catalog API
    pub catalog_base_url: String,
    /// Session cookie lifetime in hours
    pub session_ttl_hours: i64,
}

impl AppConfig {
    /// Resolve the full configuration.
    ///
    /// Each value follows the same priority order:
    /// 1. Command-line argument (data dir only, highest priority)
    /// 2. Environment variable (`BOOKSHELF_*`)
    /// 3. TOML config file
    /// 4. Compiled default (fallback)
    pub fn resolve(cli_data_dir: Option<&str>) -> Result<Self> {
        let toml_config = load_toml_config();

        let data_dir = resolve_data_dir(cli_data_dir, &toml_config)?;

        let bind_addr = resolve_value(
            "BOOKSHELF_BIND_ADDR",
            toml_config.bind_addr.as_deref(),
            DEFAULT_BIND_ADDR,
        );

        let catalog_base_url = resolve_value(
            "BOOKSHELF_CATALOG_URL",
            toml_config.catalog_base_url.as_deref(),
            DEFAULT_CATALOG_BASE_URL,
        );

        let session_ttl_hours = match std::env::var("BOOKSHELF_SESSION_TTL_HOURS") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                Error::Config(format!(
                    "BOOKSHELF_SESSION_TTL_HOURS is not a number: {}",
                    raw
                ))
            })?,
            Err(_) => toml_config
                .session_ttl_hours
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
        };

        if session_ttl_hours <= 0 {
            return Err(Error::Config(
                "session_ttl_hours must be positive".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            bind_addr,
            catalog_base_url,
            session_ttl_hours,
        })
    }

    /// Path of the SQLite database inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("bookshelf.db")
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_data_dir_exists(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
            info!("Created data directory: {}", self.data_dir.display());
        }
        Ok(())
    }
}

/// Resolve a single string value: environment variable > TOML > default
fn resolve_value(env_var: &str, toml_value: Option<&str>, default: &str) -> String {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            return value;
        }
    }
    if let Some(value) = toml_value {
        if !value.trim().is_empty() {
            return value.to_string();
        }
    }
    default.to_string()
}

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. BOOKSHELF_DATA environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
fn resolve_data_dir(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("BOOKSHELF_DATA") {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.data_dir {
        return Ok(PathBuf::from(path));
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_data_dir())
}

/// Parse the platform config file, tolerating its absence
fn load_toml_config() -> TomlConfig {
    let Some(path) = config_file_path() else {
        return TomlConfig::default();
    };
    if !path.exists() {
        return TomlConfig::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<TomlConfig>(&content) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        },
        Err(e) => {
            warn!("Could not read config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Platform configuration file path (`<config dir>/bookshelf/config.toml`)
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bookshelf").join("config.toml"))
}

/// OS-dependent default data folder path
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bookshelf"))
        .unwrap_or_else(|| PathBuf::from("./bookshelf_data"))
}
