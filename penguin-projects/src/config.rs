//! Bootstrap configuration for the penguin-projects service
//!
//! Command-line flags (with environment fallbacks) override the TOML file,
//! which overrides the compiled defaults.

use clap::Parser;
use penguin_common::config::{
    default_config_path, load_toml_config, resolve_port, resolve_projects_root, TomlConfig,
};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "penguin-projects")]
#[command(about = "Project folder tracker for Penguin")]
#[command(version)]
pub struct Args {
    /// Projects root folder to scan
    #[arg(short, long, env = "PENGUIN_PROJECTS_ROOT")]
    pub root: Option<String>,

    /// HTTP port
    #[arg(short, long, env = "PENGUIN_PORT")]
    pub port: Option<u16>,

    /// HTTP bind address
    #[arg(short, long)]
    pub bind: Option<String>,

    /// TOML config file (default: <config dir>/penguin/penguin-projects.toml)
    #[arg(short, long, env = "PENGUIN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub projects_root: PathBuf,
    pub bind: String,
    pub port: u16,
    pub log_level: String,
    /// Config file consulted, if any location could be determined
    pub config_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve settings from arguments, the TOML file and compiled defaults
    pub fn resolve(args: &Args) -> penguin_common::Result<Self> {
        let config_path = args.config.clone().or_else(default_config_path);
        let toml_config = match &config_path {
            Some(path) => load_toml_config(path)?,
            None => TomlConfig::default(),
        };

        Ok(Self {
            projects_root: resolve_projects_root(args.root.as_deref(), &toml_config),
            bind: args.bind.clone().unwrap_or_else(|| toml_config.bind.clone()),
            port: resolve_port(args.port, &toml_config),
            log_level: toml_config.logging.level.clone(),
            config_path,
        })
    }

    /// `bind:port` for the TCP listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
