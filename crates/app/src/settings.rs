//! Settings for the `pocketbook` binary.
//!
//! Read from `settings.toml` (or the file passed with `--config`), then
//! overridden by `POCKETBOOK__<SECTION>__<KEY>` environment variables.
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where transactions are kept.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// Process memory, lost on exit.
    #[default]
    Memory,
    /// SQLite file at the given path, created if missing.
    Sqlite(String),
}


#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        let options = server::ServerOptions::default();
        Self {
            bind: options.bind,
            port: options.port,
            allowed_origins: options.allowed_origins,
            database: Database::default(),
        }
    }
}

impl Server {
    pub fn options(&self) -> server::ServerOptions {
        server::ServerOptions {
            allowed_origins: self.allowed_origins.clone(),
            bind: self.bind.clone(),
            port: self.port,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Option<Auth>,
}

#[derive(Debug, Parser)]
#[command(name = "pocketbook", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings = Self::from_sources(config_path)?;

        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(level) = args.level {
            settings.app.level = level;
        }

        Ok(settings)
    }

    fn from_sources(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("POCKETBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
