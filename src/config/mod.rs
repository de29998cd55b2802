//! Configuration
//!
//! A single YAML file in the user config directory, camelCase keys, every
//! field defaulted so a missing or partial file still loads. Environment
//! variables override the file; CLI flags override both (applied in main).

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Disable delete operations globally
    #[serde(default = "default_false")]
    pub read_only: bool,

    /// Namespace filter; empty means all namespaces
    #[serde(default)]
    pub default_namespace: String,

    /// Show pods in phase Succeeded
    #[serde(default = "default_false")]
    pub show_completed: bool,

    /// Seconds between automatic refreshes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_false() -> bool {
    false
}

fn default_poll_interval() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_only: false,
            default_namespace: String::new(),
            show_completed: false,
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Config {
    /// The namespace filter as the executor wants it
    pub fn namespace(&self) -> Option<String> {
        if self.default_namespace.is_empty() {
            None
        } else {
            Some(self.default_namespace.clone())
        }
    }
}

/// Path of the configuration file
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "kubedoc")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from("kubedoc.yaml"))
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config file if present, then apply environment overrides
    pub fn load() -> Result<Config> {
        let path = config_path();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Config::default()
        };
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Built-in defaults, bypassing the file entirely
    pub fn load_defaults() -> Config {
        Config::default()
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(ns) = std::env::var("KUBEDOC_NAMESPACE") {
        config.default_namespace = ns;
    }
    if let Ok(v) = std::env::var("KUBEDOC_READ_ONLY") {
        if let Ok(b) = v.parse() {
            config.read_only = b;
        }
    }
    if let Ok(v) = std::env::var("KUBEDOC_SHOW_COMPLETED") {
        if let Ok(b) = v.parse() {
            config.show_completed = b;
        }
    }
}
