//! Discovery and refresh command handlers.
//!
//! The engine reports validation and transport failures as errors; for
//! display they are folded into a failed `DiscoverySummary` so both
//! outcomes print the same way.

use anyhow::Result;

use mcphub_core::domain::DiscoverySummary;
use mcphub_mcp::DiscoveryError;

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

/// Run incremental discovery against a server.
pub async fn discover(ctx: &CliContext, server_id: i64) -> Result<()> {
    let summary = fold(ctx.discovery.discover_tools(server_id).await);
    print_summary(&summary);
    Ok(())
}

/// Run a full refresh against a server.
pub async fn refresh(ctx: &CliContext, server_id: i64) -> Result<()> {
    let summary = fold(ctx.discovery.refresh_all_tools(server_id).await);
    print_summary(&summary);
    Ok(())
}

fn fold(result: Result<DiscoverySummary, DiscoveryError>) -> DiscoverySummary {
    result.unwrap_or_else(|e| DiscoverySummary::failed(e.to_string()))
}

fn print_summary(summary: &DiscoverySummary) {
    if !summary.success {
        println!("Discovery failed: {}", summary.message);
        return;
    }

    println!("{}", summary.message);
    if summary.tools.is_empty() {
        return;
    }

    println!();
    println!("{:<4} {:<28} {:<16} {:<8} Description", "ID", "Name", "Category", "Params");
    print_separator(90);
    for tool in &summary.tools {
        println!(
            "{:<4} {:<28} {:<16} {:<8} {}",
            tool.id,
            truncate_string(&tool.name, 27),
            truncate_string(&tool.category, 15),
            tool.parameters.len(),
            truncate_string(&tool.description, 40)
        );
    }
}
