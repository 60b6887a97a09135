//! Gateway configuration.
//!
//! Loaded once at startup from a TOML file and never mutated afterwards.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. Environment variables (`PORT`, `HOST`, `MEILI_ADDRESS`, `MEILI_API_KEY`)
//! 2. Config file (`CONFIG_PATH`, default `config/config.toml`)
//! 3. Hardcoded defaults

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use meilgate_core::optimization::OptimizationConfig;
use serde::Deserialize;

/// Config file used when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level config file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `[server]`
    pub server: ServerConfig,
    /// `[search]`
    #[serde(default)]
    pub search: SearchConfig,
}

/// Remote engine connection and local listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the remote engine, e.g. `http://127.0.0.1:7700`.
    pub address: String,
    /// Engine API key, forwarded as a Bearer token. Blank means none.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Port the gateway listens on (default: `8080`).
    #[serde(default = "default_port")]
    pub local_port: u16,
    /// Bind address (default: `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Deadline in seconds for a whole inbound request (default: `30`).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout in seconds for each outbound engine call. Must be below
    /// `timeout_secs`; unset means three quarters of `timeout_secs`.
    #[serde(default)]
    pub engine_timeout_secs: Option<u64>,
}

/// Target index and search defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// The single index this gateway serves. Required.
    #[serde(default)]
    pub index_uid: String,
    /// Optional upper bound on `limit`. Unset means unbounded.
    #[serde(default)]
    pub max_limit: Option<u64>,
    /// `[search.optimization]`
    #[serde(default)]
    pub optimization: OptimizationConfig,
}

/// Errors from config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load from `CONFIG_PATH` (or the default path), apply environment
    /// overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = resolve_path(
            std::env::var("CONFIG_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .as_deref()
                .unwrap_or(DEFAULT_CONFIG_PATH),
        )?;

        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file without validating it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    /// Parse TOML content. `origin` is only used in error messages.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// | Env Var         | Overrides             |
    /// |-----------------|-----------------------|
    /// | `PORT`          | `server.local_port`   |
    /// | `HOST`          | `server.host`         |
    /// | `MEILI_ADDRESS` | `server.address`      |
    /// | `MEILI_API_KEY` | `server.api_key`      |
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(port) = lookup("PORT") {
            self.server.local_port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a valid u16, got '{port}'")))?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(address) = lookup("MEILI_ADDRESS") {
            self.server.address = address;
        }
        if let Some(key) = lookup("MEILI_API_KEY") {
            self.server.api_key = Some(key);
        }
        Ok(())
    }

    /// Reject configurations the gateway cannot serve with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.address.trim().is_empty() {
            return Err(ConfigError::Invalid("server.address is not set".into()));
        }
        if self.search.index_uid.trim().is_empty() {
            return Err(ConfigError::Invalid("search.index_uid is not set".into()));
        }
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Invalid("server.timeout_secs must be at least 1".into()));
        }
        if let Some(engine) = self.server.engine_timeout_secs {
            if engine == 0 || engine >= self.server.timeout_secs {
                return Err(ConfigError::Invalid(format!(
                    "server.engine_timeout_secs must be between 1 and {} (exclusive), got {engine}",
                    self.server.timeout_secs
                )));
            }
        }
        if self.search.max_limit == Some(0) {
            return Err(ConfigError::Invalid("search.max_limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Socket address to bind the listener to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            ConfigError::Invalid(format!("invalid host address '{}'", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.local_port))
    }

    /// Deadline for a whole inbound request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    /// Timeout for a single engine call; always shorter than [`Self::timeout`]
    /// for a validated config.
    pub fn engine_timeout(&self) -> Duration {
        match self.server.engine_timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => self.timeout() * 3 / 4,
        }
    }
}

/// Resolve a relative config path against the working directory.
fn resolve_path(raw: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(cwd.join(path))
}
