//! Cluster settings loaded from YAML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the local party is reachable from other parties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointSettings {
    #[serde(default = "default_ip")]
    pub ip: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for EntryPointSettings {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
        }
    }
}

/// Settings locating the route table resource of a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Namespace the cluster is deployed in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Name of the config map holding the route table
    #[serde(default = "default_name")]
    pub name: String,

    /// Explicit path of the resource file (overrides namespace/name lookup)
    #[serde(default)]
    pub store: Option<PathBuf>,

    #[serde(default)]
    pub entry_point: EntryPointSettings,
}

fn default_namespace() -> String {
    "fate".to_string()
}

fn default_name() -> String {
    "route-table".to_string()
}

fn default_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9370
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            name: default_name(),
            store: None,
            entry_point: EntryPointSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        if settings.namespace.is_empty() || settings.name.is_empty() {
            anyhow::bail!("Settings need a non-empty namespace and name");
        }
        Ok(settings)
    }
}
