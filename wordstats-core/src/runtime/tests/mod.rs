use crate::conf::EngineConfig;
use crate::engine::Engine;
use crate::runtime::{ActiveEngine, build_engine, build_engine_from_log, reload_engine, run_reload_loop};
use crate::statistic::catalog::StatisticKind;
use crate::word_log::WordLog;
use arc_swap::ArcSwap;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn document(engine: &Engine) -> Value {
    let mut out = Vec::new();
    engine.write(&mut out).unwrap();
    serde_json::from_slice(&out).unwrap()
}

fn count_only() -> EngineConfig {
    EngineConfig {
        feed_capacity: 4,
        statistics: vec![StatisticKind::Count],
    }
}

#[tokio::test]
async fn build_engine_applies_whole_input() {
    let engine = build_engine(
        &CancellationToken::new(),
        &EngineConfig::default(),
        "This Is Four Words".as_bytes(),
    )
    .await
    .unwrap();

    assert!(engine.is_closed());
    assert_eq!(
        document(&engine),
        json!({
            "count": 4,
            "top_5_letters": ["d", "i", "o", "r", "s"],
            "top_5_words": ["four", "is", "this", "words"],
        })
    );
}

#[tokio::test]
async fn build_engine_registers_configured_statistics_only() {
    let engine = build_engine(&CancellationToken::new(), &count_only(), "a b c".as_bytes())
        .await
        .unwrap();

    assert_eq!(document(&engine), json!({ "count": 3 }));
}

#[tokio::test]
async fn build_from_missing_log_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = WordLog::new(dir.path().join("data.txt"));

    let engine = build_engine_from_log(&CancellationToken::new(), &count_only(), &log)
        .await
        .unwrap();

    assert_eq!(document(&engine), json!({ "count": 0 }));
}

#[tokio::test]
async fn reload_swaps_in_current_log_contents() {
    let dir = tempfile::tempdir().unwrap();
    let log = WordLog::new(dir.path().join("data.txt"));
    let parent = CancellationToken::new();
    let cfg = count_only();

    let state: ActiveEngine =
        ArcSwap::from_pointee(build_engine_from_log(&parent, &cfg, &log).await.unwrap());
    let before = state.load_full();

    log.append(b"one two").await.unwrap();
    log.append(b"three").await.unwrap();
    reload_engine(&parent, &cfg, &log, &state).await.unwrap();

    assert_eq!(document(&state.load()), json!({ "count": 3 }));
    // A reader that grabbed the previous engine still gets a valid document.
    assert_eq!(document(&before), json!({ "count": 0 }));
}

#[tokio::test]
async fn failed_reload_keeps_previous_engine() {
    let dir = tempfile::tempdir().unwrap();
    let parent = CancellationToken::new();
    let cfg = count_only();

    let state: ActiveEngine = ArcSwap::from_pointee(
        build_engine(&parent, &cfg, "kept".as_bytes()).await.unwrap(),
    );

    // A directory cannot be read as a word log.
    let log = WordLog::new(dir.path());
    assert!(reload_engine(&parent, &cfg, &log, &state).await.is_err());

    assert_eq!(document(&state.load()), json!({ "count": 1 }));
}

#[tokio::test]
async fn reload_loop_picks_up_new_words_and_stops_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(WordLog::new(dir.path().join("data.txt")));
    let shutdown = CancellationToken::new();
    let cfg = Arc::new(count_only());

    let state = Arc::new(ArcSwap::from_pointee(
        build_engine_from_log(&shutdown, &cfg, &log).await.unwrap(),
    ));

    let task = tokio::spawn(run_reload_loop(
        Duration::from_millis(20),
        cfg.clone(),
        log.clone(),
        state.clone(),
        shutdown.clone(),
    ));

    log.append(b"a b c d e").await.unwrap();

    tokio::time::timeout(Duration::from_secs(2), async {
        while document(&state.load()) != json!({ "count": 5 }) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("reload loop should rebuild from the log");

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("reload loop should stop")
        .unwrap();
}
