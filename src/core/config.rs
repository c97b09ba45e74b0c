//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.herald/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HeraldConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub project_id: Option<String>,
    pub toast_duration_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub web_url: Option<String>,
    pub auth_token: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/trpc";
pub const DEFAULT_WEB_URL: &str = "http://localhost:3000";
pub const DEFAULT_TOAST_DURATION_SECS: u64 = 4;

// ============================================================================
// Resolved Config (concrete values, no Options except credentials)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub project_id: String,
    pub base_url: String,
    pub web_url: String,
    pub auth_token: Option<String>,
    pub toast_duration: Duration,
}

/// Values passed on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub project_id: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A required setting was not provided anywhere.
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Missing(what) => write!(f, "missing required setting: {what}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.herald/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".herald").join("config.toml"))
}

/// Load config from `~/.herald/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HeraldConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HeraldConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HeraldConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HeraldConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: HeraldConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config.general);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Herald Configuration
# All settings are optional except the project id, which may also come
# from HERALD_PROJECT_ID or --project-id.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# project_id = "clx0example0project"
# toast_duration_secs = 4

# [server]
# base_url = "http://localhost:3000/api/trpc"   # Or HERALD_BASE_URL
# web_url = "http://localhost:3000"             # Used for the pricing page link
# auth_token = "..."                            # Or HERALD_AUTH_TOKEN
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HeraldConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an explicit environment lookup.
pub fn resolve_with_env(
    config: &HeraldConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Project: CLI → env → config (required)
    let project_id = cli
        .project_id
        .clone()
        .or_else(|| env("HERALD_PROJECT_ID"))
        .or_else(|| config.general.project_id.clone())
        .filter(|id| !id.trim().is_empty())
        .ok_or(ConfigError::Missing("project_id"))?;

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("HERALD_BASE_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Web URL: env → config → default
    let web_url = env("HERALD_WEB_URL")
        .or_else(|| config.server.web_url.clone())
        .unwrap_or_else(|| DEFAULT_WEB_URL.to_string());

    // Auth token: env → config
    let auth_token = env("HERALD_AUTH_TOKEN")
        .or_else(|| config.server.auth_token.clone());

    let toast_secs = config
        .general
        .toast_duration_secs
        .unwrap_or(DEFAULT_TOAST_DURATION_SECS);

    Ok(ResolvedConfig {
        project_id,
        base_url,
        web_url: web_url.trim_end_matches('/').to_string(),
        auth_token,
        toast_duration: Duration::from_secs(toast_secs),
    })
}
