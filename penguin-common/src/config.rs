//! Bootstrap configuration and projects root resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: a warning is logged and defaults
//! apply. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the projects root folder
pub const ROOT_ENV_VAR: &str = "PENGUIN_PROJECTS_ROOT";

/// Environment variable overriding the HTTP port
pub const PORT_ENV_VAR: &str = "PENGUIN_PORT";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder scanned for project folders (`~/` is expanded)
    #[serde(default)]
    pub projects_root: Option<String>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            projects_root: None,
            port: default_port(),
            bind: default_bind(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub projects_root: PathBuf,
    pub port: u16,
    pub bind: String,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            projects_root: dirs::home_dir()
                .map(|home| home.join("penguin").join("projects"))
                .unwrap_or_else(|| PathBuf::from("./penguin/projects")),
            port: default_port(),
            bind: default_bind(),
            log_level: default_log_level(),
        }
    }
}

/// Default config file location: `<config dir>/penguin/penguin-projects.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("penguin").join("penguin-projects.toml"))
}

/// Load a TOML config file.
///
/// Returns defaults (with a warning) when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Expand a leading `~` or `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the projects root folder: CLI, then environment, then TOML, then default
pub fn resolve_projects_root(cli_arg: Option<&str>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return expand_home(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.trim().is_empty() {
            return expand_home(&path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.projects_root {
        return expand_home(path);
    }

    // Priority 4: Compiled default
    CompiledDefaults::for_current_platform().projects_root
}

/// Resolve the HTTP port: CLI, then environment, then TOML (which carries the default)
pub fn resolve_port(cli_arg: Option<u16>, toml_config: &TomlConfig) -> u16 {
    if let Some(port) = cli_arg {
        return port;
    }

    if let Ok(value) = std::env::var(PORT_ENV_VAR) {
        match value.trim().parse::<u16>() {
            Ok(port) => return port,
            Err(e) => warn!(value = %value, error = %e, "Ignoring invalid {}", PORT_ENV_VAR),
        }
    }

    toml_config.port
}
