//! List command - show listening ports with their application names.

use anyhow::Result;
use portmonitor::ServerConfig;
use portmonitor_core::{DashboardService, PortScanner, RowQuery};

pub async fn run(
    config: &ServerConfig,
    search: &str,
    sort_by: &str,
    sort_order: &str,
    json: bool,
) -> Result<()> {
    let service = DashboardService::new(PortScanner::new(), config.mapping_store());
    let rows = service
        .rows(&RowQuery::from_params(search, sort_by, sort_order))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("Nenhuma conexão de escuta encontrada.");
        return Ok(());
    }

    // Table header
    println!(
        "{:<22} {:<6} {:<8} APPLICATION",
        "ADDRESS", "PORT", "STATUS"
    );
    println!("{}", "-".repeat(72));

    for row in &rows {
        let marker = if row.has_custom_mapping { "*" } else { " " };
        println!(
            "{:<22} {:<6} {:<8} {}{}",
            truncate(&row.display_address, 22),
            row.port,
            row.status,
            marker,
            truncate(&row.application_name, 33),
        );
    }

    println!("\nTotal: {} ports (* = custom name)", rows.len());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}
