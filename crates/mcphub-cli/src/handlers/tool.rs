//! Tool catalog command handlers.

use anyhow::Result;

use mcphub_core::ports::ToolFilter;

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

/// List discovered tools in a formatted table.
pub async fn list(
    ctx: &CliContext,
    server: Option<i64>,
    category: Option<String>,
    enabled: Option<bool>,
    search: Option<String>,
    page: u32,
    per_page: u32,
) -> Result<()> {
    let filter = ToolFilter {
        server_id: server,
        category,
        enabled,
        search,
        page,
        per_page,
    };

    let result = ctx.repos.tools.list(filter).await?;
    if result.tools.is_empty() {
        println!("No tools found.");
        println!("Use 'mcphub discover <server-id>' to populate the catalog.");
        return Ok(());
    }

    println!(
        "Showing {} of {} tool(s) (page {}):\n",
        result.tools.len(),
        result.total,
        result.page
    );
    println!(
        "{:<4} {:<6} {:<28} {:<16} {:<8} Description",
        "ID", "Server", "Name", "Category", "Enabled"
    );
    print_separator(100);

    for tool in result.tools {
        println!(
            "{:<4} {:<6} {:<28} {:<16} {:<8} {}",
            tool.id,
            tool.server_id,
            truncate_string(&tool.name, 27),
            truncate_string(&tool.category, 15),
            if tool.enabled { "yes" } else { "no" },
            truncate_string(&tool.description, 40)
        );
    }

    Ok(())
}

/// Flip a tool's enabled flag.
pub async fn set_enabled(ctx: &CliContext, tool_id: i64, enabled: bool) -> Result<()> {
    ctx.repos.tools.set_enabled(tool_id, enabled).await?;
    println!(
        "Tool {} is now {}.",
        tool_id,
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

/// Override a tool's category label.
pub async fn set_category(ctx: &CliContext, tool_id: i64, category: &str) -> Result<()> {
    ctx.repos.tools.set_category(tool_id, category).await?;
    println!("Tool {tool_id} is now in category '{category}'.");
    Ok(())
}

/// Print the distinct categories in the catalog.
pub async fn categories(ctx: &CliContext, server: Option<i64>) -> Result<()> {
    let categories = ctx.repos.tools.categories(server).await?;
    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }

    for category in categories {
        println!("{category}");
    }
    Ok(())
}
