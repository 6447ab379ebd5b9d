//! Configuration loading for credentials and defaults.
//!
//! Settings come from `<config-dir>/license-cli/config.toml` with environment
//! variables taking precedence (a `.env` file is honored via dotenvy). There
//! is deliberately no interactive prompt: missing credentials are reported as
//! a configuration error so the tool stays usable from scripts and CI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::DEFAULT_GRAPH_URL;

const ENV_TENANT_ID: &str = "LICENSE_CLI_TENANT_ID";
const ENV_CLIENT_ID: &str = "LICENSE_CLI_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "LICENSE_CLI_CLIENT_SECRET";
const ENV_GRAPH_URL: &str = "LICENSE_CLI_GRAPH_URL";

/// App-registration credentials for the client-credentials flow.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Resolved tool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub graph_url: String,
    /// Default snapshot path for `catalog diff` when `--snapshot` is omitted.
    pub snapshot_path: PathBuf,
}

/// On-disk shape of `config.toml`. Everything is optional; the merge with
/// environment variables decides what is actually required.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    graph_url: Option<String>,
    snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the default config file location merged with
    /// environment variables.
    pub fn load() -> Result<Self> {
        // A missing .env file is fine; only load errors in an existing one matter
        let _ = dotenvy::dotenv();

        let file = match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => ConfigFile::default(),
        };

        Self::from_parts(file)
    }

    /// Loads configuration from an explicit config file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let file = read_config_file(path)?;
        Self::from_parts(file)
    }

    fn from_parts(file: ConfigFile) -> Result<Self> {
        let tenant_id = env_or(ENV_TENANT_ID, file.tenant_id);
        let client_id = env_or(ENV_CLIENT_ID, file.client_id);
        let client_secret = env_or(ENV_CLIENT_SECRET, file.client_secret);

        let (Some(tenant_id), Some(client_id), Some(client_secret)) =
            (tenant_id, client_id, client_secret)
        else {
            anyhow::bail!(
                "Missing credentials: set tenant_id, client_id and client_secret in \
                 config.toml or via {ENV_TENANT_ID}/{ENV_CLIENT_ID}/{ENV_CLIENT_SECRET}"
            );
        };

        let graph_url = env_or(ENV_GRAPH_URL, file.graph_url)
            .unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string());

        let snapshot_path = file
            .snapshot_path
            .unwrap_or_else(|| PathBuf::from("sku-catalog.csv"));

        Ok(Self {
            credentials: Credentials {
                tenant_id,
                client_id,
                client_secret,
            },
            graph_url,
            snapshot_path,
        })
    }
}

/// Platform config file location, e.g. `~/.config/license-cli/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("license-cli").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn env_or(var: &str, fallback: Option<String>) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty()).or(fallback)
}
