use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use reporting_service::{
    api::{self, AppState},
    config::AppConfig,
    metrics_server, observability,
    reporting::ReportingService,
    store::PgReportStore,
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    // Connection lifecycle lives here; the reporting core only ever sees an
    // injected store handle.
    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(&cfg.database.uri)
        .await?;

    let state = Arc::new(AppState {
        service: ReportingService::new(PgReportStore::new(pool.clone())),
        pool,
    });

    let addr: SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind_addr: {e}"))?;

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "reporting service listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
