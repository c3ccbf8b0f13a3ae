use crate::error::{ProxyError, Result};
use crate::models::{default_model_mapping, ModelTable, DEFAULT_BASE_MODEL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub backend: BackendConfig,
    /// Extra model mappings, merged over the built-in table.
    #[serde(default)]
    pub models: HashMap<String, String>,
    #[serde(default = "default_base_model")]
    pub base_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            backend: BackendConfig::default(),
            models: HashMap::new(),
            base_model: default_base_model(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_model() -> String {
    DEFAULT_BASE_MODEL.to_string()
}

impl ProxyConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProxyError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file.
    /// Priority: CLI arg > CWD > XDG config > home dir. With no config file
    /// at all, the proxy runs on defaults plus environment variables, like
    /// the original env-driven deployment.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the backend base URL (config value or `OPENAI_API_URL`).
    pub fn effective_base_url(&self) -> Result<String> {
        if let Some(ref url) = self.backend.base_url {
            return Ok(url.clone());
        }

        std::env::var("OPENAI_API_URL").map_err(|_| {
            ProxyError::config(
                "Backend base URL not configured. Set backend.base_url in the \
                 config file or the OPENAI_API_URL environment variable.",
            )
        })
    }

    /// Resolve the bearer credential from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<String> {
        std::env::var(&self.backend.api_key_env).map_err(|_| {
            ProxyError::config(format!(
                "Environment variable '{}' not set. Set it with your backend API key.",
                self.backend.api_key_env
            ))
        })
    }

    /// Build the immutable model table: built-in mapping extended by config
    /// entries, with the configured base model as fallback.
    #[must_use]
    pub fn model_table(&self) -> ModelTable {
        let mut map = default_model_mapping();
        for (k, v) in &self.models {
            map.insert(k.clone(), v.clone());
        }
        ModelTable::new(map, self.base_model.clone())
    }
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("firebender2itp.toml"));

    // XDG / platform config dir
    if cfg!(target_os = "macos") {
        if let Some(home) = dirs_path() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("firebender2itp")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(xdg)
                    .join("firebender2itp")
                    .join("config.toml"),
            );
        }
        if let Some(home) = dirs_path() {
            paths.push(
                home.join(".config")
                    .join("firebender2itp")
                    .join("config.toml"),
            );
        }
    }

    // Home directory fallback
    if let Some(home) = dirs_path() {
        paths.push(home.join(".firebender2itp.toml"));
    }

    paths
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
