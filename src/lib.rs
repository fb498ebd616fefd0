//! fml-manager - federated-learning job documents and cluster route tables

pub mod cli;
pub mod cluster;
pub mod core;

// Re-export commonly used types
pub use crate::cluster::{ClusterResource, FileCluster, InMemoryCluster, Settings};
pub use crate::core::{Component, ComponentBuilder, Config, ConfigBuilder, Document, ModelError};
pub use crate::core::{Party, PartyBuilder, PartyType, Pipeline, PipelineBuilder, RouteTable};
