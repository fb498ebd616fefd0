//! Core domain models
//!
//! Parties and the route table, pipeline components, the job configuration,
//! and the tree merge they share. Every model is assembled through a builder
//! and rendered through [`Document`].

pub mod component;
pub mod config;
pub mod document;
pub mod error;
pub mod job_conf;
pub mod merge;
pub mod party;
pub mod pipeline;
pub mod route_table;

pub use component::{Component, ComponentBuilder, DataKind, ModelKind};
pub use config::{JobFile, RenderedJob};
pub use document::Document;
pub use error::ModelError;
pub use job_conf::*;
pub use merge::{tree_merge, tree_merge_values, MAX_MERGE_DEPTH};
pub use party::{Party, PartyBuilder, PartyType};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use route_table::RouteTable;
