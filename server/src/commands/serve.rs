//! Serve command - run the web dashboard.

use anyhow::{Context, Result};
use portmonitor::web::{self, AppState};
use portmonitor::ServerConfig;
use portmonitor_core::{DashboardService, PortScanner};
use tracing::info;

pub async fn run(config: ServerConfig) -> Result<()> {
    let store = config.mapping_store();
    store
        .ensure_initialized()
        .await
        .with_context(|| format!("Failed to create {}", store.path().display()))?;

    let addr = config.bind_addr();
    let service = DashboardService::new(PortScanner::new(), store);
    let app = web::router(AppState::new(config, service));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %listener.local_addr()?, "port monitor listening");

    axum::serve(listener, app).await?;
    Ok(())
}
