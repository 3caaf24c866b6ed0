//! Server configuration
//!
//! Values come from `GRAPH_WIDGET_*` environment variables (a `.env` file is
//! loaded first when present); anything unset keeps its default.

use std::path::PathBuf;

use axum::http::HeaderValue;
use serde::Deserialize;

use crate::domain::{DataSourceMode, ReferencePoint};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// SQLite database holding the option table
    pub database_url: String,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Origin allowed to call the REST API from another host (trunk dev server)
    pub allowed_origin: String,
    /// Directory containing the plugin's `build/` output
    pub plugin_dir: PathBuf,
    /// Public path prefix under which `plugin_dir` is served
    pub plugin_url: String,
    /// Date the trailing windows are measured back from
    pub reference_date: ReferencePoint,
    /// Where the data endpoint reads records from
    pub data_source: DataSourceMode,
    /// Run the activation hook (seed the option) during startup
    pub activate_on_start: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "sqlite:graph_widget.db".to_string(),
            log_level: "info".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            plugin_dir: PathBuf::from("."),
            plugin_url: "/".to_string(),
            reference_date: ReferencePoint::Today,
            data_source: DataSourceMode::Snapshot,
            activate_on_start: true,
        }
    }
}

impl BackendConfig {
    /// Loads configuration from the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("GRAPH_WIDGET").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_origin(&self) -> anyhow::Result<HeaderValue> {
        self.allowed_origin
            .parse::<HeaderValue>()
            .map_err(|e| anyhow::anyhow!("invalid allowed_origin '{}': {}", self.allowed_origin, e))
    }

    /// `plugin_url` normalized to start and end with a slash
    pub fn plugin_base_path(&self) -> String {
        let trimmed = self.plugin_url.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }

    /// In-memory database, fixed reference date and the activation hook enabled
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            reference_date: ReferencePoint::Fixed(
                chrono::NaiveDate::from_ymd_opt(2023, 6, 19).unwrap(),
            ),
            ..Self::default()
        }
    }
}
