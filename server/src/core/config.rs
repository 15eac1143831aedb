use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::HeaderName;
use serde::Deserialize;

use crate::domain::query::check_preset;
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER_HEADER,
};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Caller identity configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthFileConfig {
    /// Header set by the fronting proxy with the user name
    pub user_header: Option<String>,
}

/// Registry overrides: default columns per table and filter presets
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TablesFileConfig {
    #[serde(default)]
    pub columns: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub filters: HashMap<String, Vec<String>>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub auth: Option<AuthFileConfig>,
    pub tables: Option<TablesFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(auth) = other.auth {
            let current = self.auth.get_or_insert_with(AuthFileConfig::default);
            if auth.user_header.is_some() {
                tracing::trace!(user_header = ?auth.user_header, "Merging auth.user_header");
                current.user_header = auth.user_header;
            }
        }

        // Tables merge key by key so a local file can override one preset
        if let Some(tables) = other.tables {
            let current = self.tables.get_or_insert_with(TablesFileConfig::default);
            for (table, columns) in tables.columns {
                tracing::trace!(table = %table, "Merging tables.columns");
                current.columns.insert(table, columns);
            }
            for (name, lines) in tables.filters {
                tracing::trace!(preset = %name, "Merging tables.filters");
                current.filters.insert(name, lines);
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Caller identity configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lowercase header name carrying the user name
    pub user_header: String,
}

/// Registry overrides layered over the built-in tables and presets
#[derive(Debug, Clone, Default)]
pub struct TablesConfig {
    pub columns: HashMap<String, Vec<String>>,
    pub filters: HashMap<String, Vec<String>>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub tables: TablesConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.lqlgate/lqlgate.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::from_layers(cli, file_config);
        config.validate()?;
        Ok(config)
    }

    /// Layer defaults -> file config -> CLI/env overrides
    fn from_layers(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_server = file_config.server.unwrap_or_default();
        let file_auth = file_config.auth.unwrap_or_default();
        let file_tables = file_config.tables.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let user_header = cli
            .user_header
            .clone()
            .or(file_auth.user_header)
            .unwrap_or_else(|| DEFAULT_USER_HEADER.to_string())
            .trim()
            .to_ascii_lowercase();

        let debug = cli.debug || file_config.debug.unwrap_or(false);

        Self {
            server: ServerConfig { host, port },
            auth: AuthConfig { user_header },
            tables: TablesConfig {
                columns: file_tables.columns,
                filters: file_tables.filters,
            },
            debug,
        }
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if HeaderName::from_bytes(self.auth.user_header.as_bytes()).is_err() {
            anyhow::bail!(
                "Configuration error: auth.user_header '{}' is not a valid header name",
                self.auth.user_header
            );
        }

        for (table, columns) in &self.tables.columns {
            if columns.is_empty() || columns.iter().any(|c| c.trim().is_empty()) {
                anyhow::bail!(
                    "Configuration error: tables.columns.{} must list at least one non-empty column",
                    table
                );
            }
        }

        for (name, lines) in &self.tables.filters {
            check_preset(lines.as_slice()).map_err(|e| {
                anyhow::anyhow!("Configuration error: tables.filters.{}: {}", name, e)
            })?;
        }

        if is_all_interfaces(&self.server.host) {
            tracing::warn!(
                host = %self.server.host,
                header = %self.auth.user_header,
                "Binding to all interfaces; the user header is trusted as sent. \
                 Make sure only the fronting proxy can reach this port."
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.lqlgate/lqlgate.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
