pub mod toml_config;

use crate::adapters::http::DEFAULT_IDENTITY_HEADER;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_header_name, validate_non_empty_string, validate_path, validate_range,
    validate_route_prefix, Validate,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_DATABASE_PATH: &str = "./data/favorites.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

/// Command line flags. Anything not given falls back to the TOML file, then to defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "favorites-server")]
#[command(about = "REST service for users' favorite countries")]
pub struct ServerConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Prefix for the favorites routes, e.g. /api")]
    pub api_prefix: Option<String>,

    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,

    #[arg(long, help = "SQLite database file")]
    pub database_path: Option<String>,

    #[arg(long, help = "Request header carrying the authenticated user id")]
    pub identity_header: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Allowed CORS origins (any when empty)")]
    pub cors_origins: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// Fully resolved settings the server runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub store: StoreBackend,
    pub database_path: String,
    pub identity_header: String,
    pub cors_origins: Vec<String>,
    pub verbose: bool,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            store: StoreBackend::Sqlite,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            cors_origins: Vec::new(),
            verbose: false,
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// 合併 CLI 參數與 TOML 檔案：CLI > TOML > 預設值
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(self.merge(file))
    }

    pub fn merge(&self, file: TomlConfig) -> Settings {
        let defaults = Settings::default();
        let server = file.server.unwrap_or_default();
        let store = file.store.unwrap_or_default();
        let auth = file.auth.unwrap_or_default();
        let logging = file.logging.unwrap_or_default();

        let cors_origins = if self.cors_origins.is_empty() {
            server.cors_origins.unwrap_or(defaults.cors_origins)
        } else {
            self.cors_origins.clone()
        };

        Settings {
            host: self.host.clone().or(server.host).unwrap_or(defaults.host),
            port: self.port.or(server.port).unwrap_or(defaults.port),
            api_prefix: self
                .api_prefix
                .clone()
                .or(server.api_prefix)
                .unwrap_or(defaults.api_prefix),
            store: self.store.or(store.backend).unwrap_or(defaults.store),
            database_path: self
                .database_path
                .clone()
                .or(store.database_path)
                .unwrap_or(defaults.database_path),
            identity_header: self
                .identity_header
                .clone()
                .or(auth.identity_header)
                .unwrap_or(defaults.identity_header),
            cors_origins,
            verbose: self.verbose || logging.verbose.unwrap_or(false),
            log_json: self.log_json || logging.json.unwrap_or(false),
        }
    }
}

impl Settings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_range("server.port", self.port, 1, u16::MAX)?;
        validate_route_prefix("server.api_prefix", &self.api_prefix)?;
        validate_header_name("auth.identity_header", &self.identity_header)?;

        if self.store == StoreBackend::Sqlite {
            validate_path("store.database_path", &self.database_path)?;
        }

        for origin in &self.cors_origins {
            validate_non_empty_string("server.cors_origins", origin)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
