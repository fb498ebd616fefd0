//! File-backed cluster resource
//!
//! The file mirrors a config map: a `data` mapping whose `route_table.json`
//! entry holds the serialized route table. Other data entries are preserved
//! on write.

use crate::cluster::{entry_point_of, ClusterResource, EntryPointSettings, Settings};
use crate::core::{document::Document, route_table::RouteTable};
use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config map entry holding the route table
pub const ROUTE_TABLE_ENTRY: &str = "route_table.json";

/// Config map stored as a JSON file
pub struct FileCluster {
    path: PathBuf,
    entry_point: EntryPointSettings,
}

impl FileCluster {
    /// Create a store over an explicit file
    pub fn new(path: impl Into<PathBuf>, entry_point: EntryPointSettings) -> Self {
        Self {
            path: path.into(),
            entry_point,
        }
    }

    /// Create store under the local data directory, keyed by namespace and name
    pub fn with_default_path(namespace: &str, name: &str, entry_point: EntryPointSettings) -> Self {
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        let path = data_dir
            .join("fml-manager")
            .join(namespace)
            .join(format!("{}.json", name));
        Self::new(path, entry_point)
    }

    /// Create store from settings
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.store {
            Some(path) => Self::new(path.clone(), settings.entry_point.clone()),
            None => Self::with_default_path(
                &settings.namespace,
                &settings.name,
                settings.entry_point.clone(),
            ),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw config map, if the file exists
    async fn read_config_map(&self) -> Result<Option<Map<String, Value>>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No resource at {}, starting empty", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", self.path.display()))?;
        match value {
            Value::Object(map) => Ok(Some(map)),
            _ => anyhow::bail!("Config map {} is not a mapping", self.path.display()),
        }
    }
}

#[async_trait::async_trait]
impl ClusterResource for FileCluster {
    async fn get_route_table(&self) -> Result<RouteTable> {
        let Some(config_map) = self.read_config_map().await? else {
            return Ok(RouteTable::new());
        };

        let entry = match config_map.get("data").and_then(|data| data.get(ROUTE_TABLE_ENTRY)) {
            None => return Ok(RouteTable::new()),
            Some(Value::String(entry)) => entry,
            Some(_) => anyhow::bail!(
                "{} in {} is not a string",
                ROUTE_TABLE_ENTRY,
                self.path.display()
            ),
        };

        let resource: Value = serde_json::from_str(entry)
            .with_context(|| format!("Invalid {} in {}", ROUTE_TABLE_ENTRY, self.path.display()))?;
        let table = RouteTable::from_dict(&resource)?;
        info!(
            "Loaded route table with {} parties from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    async fn set_route_table(&self, route_table: &RouteTable) -> Result<()> {
        let mut config_map = self.read_config_map().await?.unwrap_or_default();

        let entry = serde_json::to_string_pretty(&route_table.to_dict())?;
        let data = config_map
            .entry("data")
            .or_insert_with(|| json!({}));
        match data.as_object_mut() {
            Some(data) => {
                data.insert(ROUTE_TABLE_ENTRY.to_string(), Value::String(entry));
            }
            None => anyhow::bail!("Config map {} has a non-mapping 'data'", self.path.display()),
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(config_map))?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!(
            "Saved route table with {} parties to {}",
            route_table.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn get_entry_point(&self) -> Result<Value> {
        Ok(entry_point_of(&self.entry_point))
    }
}
