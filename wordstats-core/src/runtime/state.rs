use crate::conf::EngineConfig;
use crate::engine::Engine;
use crate::statistic::catalog::build_statistics;
use crate::word_log::WordLog;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// The engine currently answering snapshot requests.
pub type ActiveEngine = ArcSwap<Engine>;

/// Build a finished engine over `reader` with the configured statistics.
///
/// Every word of `reader` has been applied when this returns, so the engine's
/// snapshot reflects the whole input.
pub async fn build_engine<R>(
    parent: &CancellationToken,
    cfg: &EngineConfig,
    reader: R,
) -> Result<Engine>
where
    R: AsyncRead + Unpin,
{
    let engine = Engine::with_feed_capacity(parent, cfg.feed_capacity);

    for statistic in build_statistics(&cfg.statistics) {
        engine.register(statistic)?;
    }

    let words = engine.process(reader).await?;
    engine.finish().await?;

    tracing::debug!(words, statistics = engine.len(), "engine built");
    Ok(engine)
}

pub async fn build_engine_from_log(
    parent: &CancellationToken,
    cfg: &EngineConfig,
    log: &WordLog,
) -> Result<Engine> {
    let reader = log.open().await?;

    build_engine(parent, cfg, reader)
        .await
        .with_context(|| format!("failed to build statistics from {}", log.path().display()))
}

pub async fn reload_engine(
    parent: &CancellationToken,
    cfg: &EngineConfig,
    log: &WordLog,
    state: &ActiveEngine,
) -> Result<()> {
    // Build the new engine OFFLINE.
    let new_engine = build_engine_from_log(parent, cfg, log).await?;

    let old = state.load();
    tracing::info!(
        old_statistics = old.len(),
        new_statistics = new_engine.len(),
        "statistics reloaded"
    );

    // Atomic swap (point of no return). Readers still holding the old engine
    // keep a valid, finished snapshot.
    state.store(Arc::new(new_engine));

    Ok(())
}

/// Rebuild the active engine from the log every `interval` until `shutdown`.
///
/// A failed rebuild is logged and the previous engine keeps serving.
pub async fn run_reload_loop(
    interval: Duration,
    cfg: Arc<EngineConfig>,
    log: Arc<WordLog>,
    state: Arc<ActiveEngine>,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately; the caller built the initial engine.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!("reload loop stopped");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = reload_engine(&shutdown, &cfg, &log, &state).await {
                    tracing::warn!(error = %format!("{e:#}"), "reload failed, keeping previous statistics");
                }
            }
        }
    }
}
