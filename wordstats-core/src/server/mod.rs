//! HTTP listeners around the engine.
//!
//! Two independent services share nothing but the word log on disk:
//!
//! - ingest: appends posted text to the log
//! - stats: periodically rebuilds an engine from the log and serves its
//!   snapshot

mod ingest;
mod stats;
#[cfg(test)]
mod tests;

pub use ingest::ingest_router;
pub use stats::stats_router;

use crate::conf::WordstatsConfig;
use crate::runtime::{build_engine_from_log, run_reload_loop};
use crate::word_log::WordLog;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Run the ingest listener until `shutdown` is cancelled.
pub async fn run_ingest(cfg: &WordstatsConfig, shutdown: CancellationToken) -> Result<()> {
    let log = Arc::new(WordLog::new(&cfg.log.path));
    let listener = bind(&cfg.ingest.listen).await?;

    tracing::info!(log = %cfg.log.path.display(), "ingest listener starting");
    serve(listener, ingest_router(log), shutdown).await
}

/// Run the stats listener and its reload loop until `shutdown` is cancelled.
pub async fn run_stats(cfg: &WordstatsConfig, shutdown: CancellationToken) -> Result<()> {
    let log = Arc::new(WordLog::new(&cfg.log.path));
    let engine_cfg = Arc::new(cfg.engine.clone());

    let initial = build_engine_from_log(&shutdown, &engine_cfg, &log).await?;
    let state = Arc::new(ArcSwap::from_pointee(initial));

    let reload = tokio::spawn(run_reload_loop(
        cfg.stats.reload_interval(),
        engine_cfg,
        log,
        state.clone(),
        shutdown.clone(),
    ));

    let listener = bind(&cfg.stats.listen).await?;
    tracing::info!(
        reload_interval_secs = cfg.stats.reload_interval_secs,
        "stats listener starting"
    );

    let served = serve(listener, stats_router(state), shutdown.clone()).await;

    // Stop the reload loop however the listener ended.
    shutdown.cancel();
    reload.await.context("reload loop panicked")?;

    served
}

/// Serve `router` on `listener` until `shutdown` is cancelled.
pub async fn serve(listener: TcpListener, router: Router, shutdown: CancellationToken) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .with_context(|| format!("listener on {addr} failed"))
}

/// Cancel `shutdown` on ctrl-c.
pub fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("shutdown requested"),
            Err(e) => tracing::warn!(error = %e, "failed to listen for ctrl-c, shutting down"),
        }
        shutdown.cancel();
    });
}

async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}
