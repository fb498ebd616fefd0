//! CLI command definitions

use crate::core::party::{Party, PartyType};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Route table operations
#[derive(Debug, Subcommand, Clone)]
pub enum RouteCommand {
    /// List every party in the route table
    List(ListCommand),

    /// Add a party (replaces an existing entry with the same id)
    Add(PartyArgs),

    /// Update a party's entry point
    Update(PartyArgs),

    /// Remove parties by id; unknown ids are ignored
    Remove(RemoveCommand),
}

/// List the route table
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// A party to register
#[derive(Debug, Args, Clone)]
pub struct PartyArgs {
    /// Party id (ignored for an exchange)
    #[arg(long, required_unless_present = "exchange")]
    pub id: Option<String>,

    /// Ip address the party is reachable at
    #[arg(long)]
    pub ip: String,

    /// Port the party is reachable at
    #[arg(long)]
    pub port: u16,

    /// Register the exchange instead of a normal party
    #[arg(long)]
    pub exchange: bool,
}

impl PartyArgs {
    /// Build the party described by these arguments
    pub fn to_party(&self) -> Party {
        let party_type = if self.exchange {
            PartyType::Exchange
        } else {
            PartyType::Normal
        };

        let mut builder = Party::builder();
        if let Some(id) = &self.id {
            builder.with_id(id.clone());
        }
        builder
            .with_ip(self.ip.clone())
            .with_port(self.port)
            .with_type(party_type)
            .build()
    }
}

/// Remove parties
#[derive(Debug, Args, Clone)]
pub struct RemoveCommand {
    /// Party ids to remove
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Show the local entry point
#[derive(Debug, Args, Clone)]
pub struct EntryPointCommand {}

/// Render job documents
#[derive(Debug, Args, Clone)]
pub struct RenderCommand {
    /// Path to job YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Write dsl.json and conf.json into this directory instead of printing
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Validate a job file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to job YAML file
    #[arg(short, long)]
    pub file: PathBuf,
}
