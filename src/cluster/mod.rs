//! Access to the cluster resource holding the route table

pub mod settings;
pub mod store;

pub use settings::{EntryPointSettings, Settings};
pub use store::FileCluster;

use crate::core::{
    document::Document,
    party::{Party, PartyType},
    route_table::RouteTable,
};
use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

/// Trait for cluster resource backends
#[async_trait::async_trait]
pub trait ClusterResource: Send + Sync {
    /// Load an owned copy of the route table
    async fn get_route_table(&self) -> Result<RouteTable>;

    /// Write the route table back to the resource
    async fn set_route_table(&self, route_table: &RouteTable) -> Result<()>;

    /// Entry point of the local party
    async fn get_entry_point(&self) -> Result<Value>;
}

/// Entry point tree for an ip/port pair
pub fn entry_point_of(settings: &EntryPointSettings) -> Value {
    Party::new("", settings.ip.clone(), settings.port, PartyType::Normal).to_entry_point()
}

/// In-memory cluster resource (for testing or ephemeral use)
pub struct InMemoryCluster {
    resource: tokio::sync::RwLock<Value>,
    entry_point: EntryPointSettings,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self::with_resource(json!({ "route_table": {} }))
    }

    /// Seed with an existing route table resource
    pub fn with_resource(resource: Value) -> Self {
        Self {
            resource: tokio::sync::RwLock::new(resource),
            entry_point: EntryPointSettings::default(),
        }
    }

    pub fn with_entry_point(mut self, entry_point: EntryPointSettings) -> Self {
        self.entry_point = entry_point;
        self
    }

    /// Raw copy of the stored resource
    pub async fn resource(&self) -> Value {
        self.resource.read().await.clone()
    }
}

impl Default for InMemoryCluster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ClusterResource for InMemoryCluster {
    async fn get_route_table(&self) -> Result<RouteTable> {
        let resource = self.resource.read().await;
        Ok(RouteTable::from_dict(&resource)?)
    }

    async fn set_route_table(&self, route_table: &RouteTable) -> Result<()> {
        let mut resource = self.resource.write().await;
        *resource = route_table.to_dict();
        info!("Stored route table with {} parties", route_table.len());
        Ok(())
    }

    async fn get_entry_point(&self) -> Result<Value> {
        Ok(entry_point_of(&self.entry_point))
    }
}
