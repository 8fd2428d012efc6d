use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{OctofitError, Result};

/// Environment variable holding the codespace name the API host is derived from.
///
/// Only binaries read it; the library receives the value through
/// [`Config::with_codespace_name`].
pub const CODESPACE_ENV: &str = "CODESPACE_NAME";

/// Main configuration structure for OctoFit
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Full base URL of the API (e.g., "http://localhost:8000"). Takes
    /// precedence over the codespace-derived host.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Codespace name the host is built from: `<name>-<port>.<domain_suffix>`
    #[serde(default)]
    pub codespace_name: Option<String>,
    /// Forwarded port of the API inside the codespace
    #[serde(default = "default_port")]
    pub port: u16,
    /// Domain suffix appended to the codespace host
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,
    /// URL scheme for the codespace host
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Request timeout in seconds (unset = wait indefinitely)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Retries for transport errors, 429 and 5xx responses (0 = single attempt)
    #[serde(default)]
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            codespace_name: None,
            port: default_port(),
            domain_suffix: default_domain_suffix(),
            scheme: default_scheme(),
            timeout_secs: None,
            max_retries: 0,
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

fn default_domain_suffix() -> String {
    "app.github.dev".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

impl ApiConfig {
    /// Resolve the API root URL.
    ///
    /// An explicit `base_url` wins; otherwise the host is templated from the
    /// codespace name. The returned URL always ends with `/` so resource
    /// paths can be joined onto it.
    pub fn resolve_base_url(&self) -> Result<Url> {
        let raw = match (&self.base_url, &self.codespace_name) {
            (Some(base), _) if !base.trim().is_empty() => base.trim().to_string(),
            (_, Some(name)) if !name.trim().is_empty() => format!(
                "{}://{}-{}.{}",
                self.scheme,
                name.trim(),
                self.port,
                self.domain_suffix.trim_start_matches('.')
            ),
            _ => {
                return Err(OctofitError::Config(format!(
                    "No API host configured: set api.base_url, pass --base-url, \
                     or export {CODESPACE_ENV}"
                )));
            }
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| OctofitError::Config(format!("Invalid API URL '{raw}': {e}")))?;
        if url.cannot_be_a_base() {
            return Err(OctofitError::Config(format!(
                "Invalid API URL '{raw}': not a base URL"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Config {
    /// Load configuration from `path`, or from the first default location that
    /// exists, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        for candidate in default_config_paths() {
            if candidate.exists() {
                tracing::info!("Loading config from: {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OctofitError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| OctofitError::Config(format!("Failed to parse config: {e}")))
    }

    /// Inject the codespace name captured at startup. A config file value is
    /// kept when no name was provided.
    pub fn with_codespace_name(mut self, name: Option<String>) -> Self {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.api.codespace_name = Some(name);
        }
        self
    }

    /// Override the API base URL (e.g., from a command-line flag)
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if base_url.is_some() {
            self.api.base_url = base_url;
        }
        self
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|h| h.join(".octofit").join("config.toml")),
        dirs::config_dir().map(|c| c.join("octofit").join("config.toml")),
        Some(PathBuf::from("octofit.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}
