//! Configuration loading and model directory resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Default HTTP port of the classifier UI
pub const DEFAULT_PORT: u16 = 5745;

/// Default bind address (local access only)
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default model directory, relative to the working directory
pub const DEFAULT_MODEL_DIR: &str = "./models";

pub const ENV_MODEL_DIR: &str = "WQC_MODEL_DIR";
pub const ENV_PORT: &str = "WQC_PORT";
pub const ENV_BIND: &str = "WQC_BIND";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TomlConfig {
    pub model_dir: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind: Option<String>,
}

/// Values given on the command line (highest priority)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub model_dir: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind: Option<String>,
}

/// Resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub model_dir: PathBuf,
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve every setting in priority order:
    /// 1. Command-line argument
    /// 2. Environment variable
    /// 3. TOML config file
    /// 4. Compiled default
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let toml_config = match find_config_file() {
            Some(path) => load_toml_config(&path)?,
            None => TomlConfig::default(),
        };
        Self::resolve_with(cli, &toml_config)
    }

    /// Same as [`resolve`](Self::resolve) with an already loaded TOML config
    pub fn resolve_with(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let model_dir = cli
            .model_dir
            .clone()
            .or_else(|| std::env::var(ENV_MODEL_DIR).ok().map(PathBuf::from))
            .or_else(|| toml_config.model_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));

        let port = match cli.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(value) => value.parse().map_err(|_| {
                    Error::Config(format!("{}: invalid port '{}'", ENV_PORT, value))
                })?,
                Err(_) => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let bind = cli
            .bind
            .clone()
            .or_else(|| std::env::var(ENV_BIND).ok())
            .or_else(|| toml_config.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Ok(Self {
            model_dir,
            bind,
            port,
        })
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|_| Error::Config(format!("Invalid bind address: {}", self.bind)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Locate the config file for the platform, if one exists
pub fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("wqc").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        // System-wide fallback
        let system_config = PathBuf::from("/etc/wqc/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
