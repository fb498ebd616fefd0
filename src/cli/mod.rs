//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{EntryPointCommand, RenderCommand, RouteCommand, ValidateCommand};
use std::path::PathBuf;

/// Federated-learning job document and route table manager
#[derive(Debug, Parser, Clone)]
#[command(name = "fml-manager")]
#[command(version = "0.1.0")]
#[command(about = "Builds federated-learning job documents and manages route tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to cluster settings file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Namespace of the cluster (overrides settings)
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Name of the route table config map (overrides settings)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Explicit route table resource file (overrides settings)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Inspect or edit the route table
    #[command(subcommand)]
    Route(RouteCommand),

    /// Show the entry point of the local party
    EntryPoint(EntryPointCommand),

    /// Render pipeline and job configuration documents from a job file
    Render(RenderCommand),

    /// Validate a job file
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_add() {
        let cli = Cli::try_parse_from([
            "fml-manager", "--namespace", "fate-10000", "route", "add",
            "--id", "9999", "--ip", "192.168.2.2", "--port", "30010",
        ])
        .unwrap();

        assert_eq!(cli.namespace.as_deref(), Some("fate-10000"));
        match cli.command {
            Command::Route(RouteCommand::Add(party)) => {
                assert_eq!(party.id.as_deref(), Some("9999"));
                assert_eq!(party.port, 30010);
                assert!(!party.exchange);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_route_remove_many() {
        let cli = Cli::try_parse_from(["fml-manager", "route", "remove", "9999", "8888"]).unwrap();
        match cli.command {
            Command::Route(RouteCommand::Remove(cmd)) => assert_eq!(cmd.ids, vec!["9999", "8888"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_port_must_be_numeric() {
        assert!(Cli::try_parse_from([
            "fml-manager", "route", "add", "--id", "1", "--ip", "h", "--port", "http",
        ])
        .is_err());
    }
}
