//! Server catalog command handlers.

use anyhow::Result;

use mcphub_core::domain::{McpServer, NewMcpServer};
use mcphub_core::ports::ServerFilter;

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

use super::{parse_auth_type, parse_status, parse_tags};

/// Register a new MCP server. New servers start out inactive.
pub async fn add(
    ctx: &CliContext,
    name: String,
    url: String,
    description: String,
    auth_type: &str,
    auth_config: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let auth_type = parse_auth_type(auth_type)?;

    let mut server = NewMcpServer::new(name, url).with_description(description);
    server.auth_type = auth_type;
    server.auth_config = auth_config;
    if let Some(tags) = tags {
        server = server.with_tags(parse_tags(&tags));
    }

    let created = ctx.repos.servers.insert(server).await?;
    println!("Registered server '{}' with ID {}.", created.name, created.id);
    println!("Activate it with: mcphub server set-status {} active", created.id);
    Ok(())
}

/// List registered servers in a formatted table.
pub async fn list(
    ctx: &CliContext,
    status: Option<String>,
    enabled: Option<bool>,
    search: Option<String>,
    page: u32,
    per_page: u32,
) -> Result<()> {
    let status = status.as_deref().map(parse_status).transpose()?;
    let filter = ServerFilter {
        status,
        enabled,
        search,
        page,
        per_page,
    };

    let result = ctx.repos.servers.list(filter).await?;
    if result.servers.is_empty() {
        println!("No servers found.");
        println!("Use 'mcphub server add <name> <url>' to register one.");
        return Ok(());
    }

    println!(
        "Showing {} of {} server(s) (page {}):\n",
        result.servers.len(),
        result.total,
        result.page
    );
    println!(
        "{:<4} {:<20} {:<10} {:<8} {:<8} URL",
        "ID", "Name", "Status", "Auth", "Enabled"
    );
    print_separator(80);

    for server in result.servers {
        println!(
            "{:<4} {:<20} {:<10} {:<8} {:<8} {}",
            server.id,
            truncate_string(&server.name, 19),
            server.status.as_str(),
            server.auth_type.as_str(),
            if server.enabled { "yes" } else { "no" },
            server.url
        );
    }

    Ok(())
}

/// Show one server in detail, including its tool count.
pub async fn show(ctx: &CliContext, server_id: i64) -> Result<()> {
    let server = ctx.repos.servers.get_by_id(server_id).await?;
    let tool_count = ctx.repos.tools.count_by_server(server_id).await?;

    println!("Server {}:", server.id);
    println!("  Name:        {}", server.name);
    if !server.description.is_empty() {
        println!("  Description: {}", server.description);
    }
    println!("  URL:         {}", server.url);
    println!("  Auth type:   {}", server.auth_type.as_str());
    println!("  Status:      {}", server.status.as_str());
    println!("  Enabled:     {}", server.enabled);
    if !server.tags.is_empty() {
        println!("  Tags:        {}", server.tags.join(", "));
    }
    println!("  Tools:       {tool_count}");
    println!("  Registered:  {}", server.created_at.format("%Y-%m-%d %H:%M"));
    Ok(())
}

/// Arguments for the server update command.
pub struct UpdateArgs {
    pub server_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub auth_type: Option<String>,
    pub auth_config: Option<String>,
    pub enabled: Option<bool>,
    pub tags: Option<String>,
}

/// Update a server's registration in place.
pub async fn update(ctx: &CliContext, args: UpdateArgs) -> Result<()> {
    let mut server: McpServer = ctx.repos.servers.get_by_id(args.server_id).await?;

    if let Some(name) = args.name {
        server.name = name;
    }
    if let Some(description) = args.description {
        server.description = description;
    }
    if let Some(url) = args.url {
        server.url = url;
    }
    if let Some(auth_type) = args.auth_type {
        server.auth_type = parse_auth_type(&auth_type)?;
    }
    if let Some(auth_config) = args.auth_config {
        server.auth_config = Some(auth_config);
    }
    if let Some(enabled) = args.enabled {
        server.enabled = enabled;
    }
    if let Some(tags) = args.tags {
        server.tags = parse_tags(&tags);
    }

    ctx.repos.servers.update(&server).await?;
    println!("Updated server {}.", server.id);
    Ok(())
}

/// Set a server's status.
pub async fn set_status(ctx: &CliContext, server_id: i64, status: &str) -> Result<()> {
    let status = parse_status(status)?;
    ctx.repos.servers.set_status(server_id, status).await?;
    println!("Server {} is now {}.", server_id, status.as_str());
    Ok(())
}

/// Remove a server; its tools are deleted with it.
pub async fn remove(ctx: &CliContext, server_id: i64) -> Result<()> {
    let tool_count = ctx.repos.tools.count_by_server(server_id).await?;
    ctx.repos.servers.delete(server_id).await?;
    println!("Removed server {server_id} and {tool_count} tool(s).");
    Ok(())
}
