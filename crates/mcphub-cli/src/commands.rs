//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;

/// Available commands for the MCP tool catalog.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage registered MCP servers
    Server {
        #[command(subcommand)]
        command: ServerCommand,
    },

    /// Discover tools from a server and merge them into the catalog
    Discover {
        /// ID of the server to discover from
        server_id: i64,
    },

    /// Refresh a server's tools, replacing its whole catalog entry
    Refresh {
        /// ID of the server to refresh
        server_id: i64,
    },

    /// Inspect and edit discovered tools
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },
}

/// Server catalog subcommands.
#[derive(Subcommand)]
pub enum ServerCommand {
    /// Register a new MCP server
    Add {
        /// Unique server name
        name: String,
        /// Server endpoint URL (http or https)
        url: String,
        /// Human-readable description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Auth type: none, bearer, basic, api_key
        #[arg(long, default_value = "none")]
        auth_type: String,
        /// Auth config as a JSON blob (e.g. '{"token":"..."}')
        #[arg(long)]
        auth_config: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List registered servers
    List {
        /// Filter by status: active, inactive, error
        #[arg(long)]
        status: Option<String>,
        /// Filter by enabled flag
        #[arg(long)]
        enabled: Option<bool>,
        /// Substring match against name and description
        #[arg(long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "20")]
        per_page: u32,
    },

    /// Show one server in detail
    Show {
        /// Server ID
        server_id: i64,
    },

    /// Update a server's registration
    Update {
        /// Server ID
        server_id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New endpoint URL
        #[arg(long)]
        url: Option<String>,
        /// New auth type: none, bearer, basic, api_key
        #[arg(long)]
        auth_type: Option<String>,
        /// New auth config JSON blob
        #[arg(long)]
        auth_config: Option<String>,
        /// New enabled flag
        #[arg(long)]
        enabled: Option<bool>,
        /// New comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Set a server's status: active, inactive, error
    SetStatus {
        /// Server ID
        server_id: i64,
        /// New status
        status: String,
    },

    /// Remove a server and all of its tools
    Remove {
        /// Server ID
        server_id: i64,
    },
}

/// Tool catalog subcommands.
#[derive(Subcommand)]
pub enum ToolCommand {
    /// List discovered tools
    List {
        /// Only tools owned by this server
        #[arg(long)]
        server: Option<i64>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Filter by enabled flag
        #[arg(long)]
        enabled: Option<bool>,
        /// Substring match against name and description
        #[arg(long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "50")]
        per_page: u32,
    },

    /// Enable a tool
    Enable {
        /// Tool ID
        tool_id: i64,
    },

    /// Disable a tool
    Disable {
        /// Tool ID
        tool_id: i64,
    },

    /// Override a tool's category
    SetCategory {
        /// Tool ID
        tool_id: i64,
        /// New category label
        category: String,
    },

    /// List the distinct categories in the catalog
    Categories {
        /// Only categories used by this server
        #[arg(long)]
        server: Option<i64>,
    },
}
