//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface definition for the MCP tool catalog.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "mcphub")]
#[command(about = "Manage MCP servers and discover their tools")]
#[command(version)]
pub struct Cli {
    /// Override the catalog database path for this invocation
    #[arg(long = "db", global = true, env = "MCPHUB_DB")]
    pub db: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["mcphub", "--verbose", "--db", "/tmp/catalog.db", "server", "list"]);
        assert!(cli.verbose);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/catalog.db")));
    }

    #[test]
    fn test_discover_takes_server_id() {
        let cli = Cli::parse_from(["mcphub", "discover", "3"]);
        match cli.command {
            Some(Commands::Discover { server_id }) => assert_eq!(server_id, 3),
            _ => panic!("expected discover command"),
        }
    }
}
