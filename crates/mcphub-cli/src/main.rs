//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers which delegate to the
//! repositories and the discovery engine.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcphub_cli::{Cli, CliConfig, Commands, ServerCommand, ToolCommand, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose overrides RUST_LOG's default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Bootstrap the CLI context (composition root)
    let config = CliConfig { db_path: cli.db };
    let ctx = bootstrap(config).await?;

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Server { command } => match command {
            ServerCommand::Add {
                name,
                url,
                description,
                auth_type,
                auth_config,
                tags,
            } => {
                handlers::server::add(&ctx, name, url, description, &auth_type, auth_config, tags)
                    .await?;
            }
            ServerCommand::List {
                status,
                enabled,
                search,
                page,
                per_page,
            } => {
                handlers::server::list(&ctx, status, enabled, search, page, per_page).await?;
            }
            ServerCommand::Show { server_id } => {
                handlers::server::show(&ctx, server_id).await?;
            }
            ServerCommand::Update {
                server_id,
                name,
                description,
                url,
                auth_type,
                auth_config,
                enabled,
                tags,
            } => {
                let args = handlers::server::UpdateArgs {
                    server_id,
                    name,
                    description,
                    url,
                    auth_type,
                    auth_config,
                    enabled,
                    tags,
                };
                handlers::server::update(&ctx, args).await?;
            }
            ServerCommand::SetStatus { server_id, status } => {
                handlers::server::set_status(&ctx, server_id, &status).await?;
            }
            ServerCommand::Remove { server_id } => {
                handlers::server::remove(&ctx, server_id).await?;
            }
        },
        Commands::Discover { server_id } => {
            handlers::discover::discover(&ctx, server_id).await?;
        }
        Commands::Refresh { server_id } => {
            handlers::discover::refresh(&ctx, server_id).await?;
        }
        Commands::Tool { command } => match command {
            ToolCommand::List {
                server,
                category,
                enabled,
                search,
                page,
                per_page,
            } => {
                handlers::tool::list(&ctx, server, category, enabled, search, page, per_page)
                    .await?;
            }
            ToolCommand::Enable { tool_id } => {
                handlers::tool::set_enabled(&ctx, tool_id, true).await?;
            }
            ToolCommand::Disable { tool_id } => {
                handlers::tool::set_enabled(&ctx, tool_id, false).await?;
            }
            ToolCommand::SetCategory { tool_id, category } => {
                handlers::tool::set_category(&ctx, tool_id, &category).await?;
            }
            ToolCommand::Categories { server } => {
                handlers::tool::categories(&ctx, server).await?;
            }
        },
    }

    Ok(())
}
