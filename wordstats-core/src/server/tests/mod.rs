use crate::conf::EngineConfig;
use crate::engine::Engine;
use crate::runtime::{ActiveEngine, build_engine};
use crate::server::{ingest_router, serve, stats_router};
use crate::word_log::WordLog;
use arc_swap::ArcSwap;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Running {
    base_url: String,
    shutdown: CancellationToken,
    task: JoinHandle<anyhow::Result<()>>,
}

impl Running {
    async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(serve(listener, router, shutdown.clone()));

        Self {
            base_url,
            shutdown,
            task,
        }
    }

    async fn stop(self) {
        self.shutdown.cancel();
        self.task.await.unwrap().unwrap();
    }
}

async fn active(input: &str) -> Arc<ActiveEngine> {
    let engine: Engine = build_engine(
        &CancellationToken::new(),
        &EngineConfig::default(),
        input.as_bytes(),
    )
    .await
    .unwrap();
    Arc::new(ArcSwap::from_pointee(engine))
}

#[tokio::test]
async fn ingest_appends_body_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(WordLog::new(dir.path().join("data.txt")));
    let server = Running::start(ingest_router(log.clone())).await;

    let res = reqwest::Client::new()
        .post(format!("{}/", server.base_url))
        .body("Some Words")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        std::fs::read_to_string(log.path()).unwrap(),
        "Some Words\n"
    );
    server.stop().await;
}

#[tokio::test]
async fn ingest_reports_unwritable_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(WordLog::new(dir.path()));
    let server = Running::start(ingest_router(log)).await;

    let res = reqwest::Client::new()
        .post(format!("{}/", server.base_url))
        .body("lost")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    server.stop().await;
}

#[tokio::test]
async fn ingest_only_accepts_post() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(WordLog::new(dir.path().join("data.txt")));
    let server = Running::start(ingest_router(log)).await;

    let res = reqwest::get(format!("{}/", server.base_url)).await.unwrap();

    assert_eq!(res.status(), 405);
    server.stop().await;
}

#[tokio::test]
async fn stats_serves_active_document() {
    let state = active("This Is Four Words").await;
    let server = Running::start(stats_router(state)).await;

    let res = reqwest::get(format!("{}/stats", server.base_url))
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = serde_json::from_str(&res.text().await.unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "count": 4,
            "top_5_letters": ["d", "i", "o", "r", "s"],
            "top_5_words": ["four", "is", "this", "words"],
        })
    );
    server.stop().await;
}

#[tokio::test]
async fn stats_follows_swapped_engine() {
    let state = active("before").await;
    let server = Running::start(stats_router(state.clone())).await;

    let replacement = build_engine(
        &CancellationToken::new(),
        &EngineConfig::default(),
        "after after".as_bytes(),
    )
    .await
    .unwrap();
    state.store(Arc::new(replacement));

    let body: Value = reqwest::get(format!("{}/stats", server.base_url))
        .await
        .unwrap()
        .text()
        .await
        .map(|text| serde_json::from_str(&text).unwrap())
        .unwrap();

    assert_eq!(body["count"], json!(2));
    assert_eq!(body["top_5_words"], json!(["after"]));
    server.stop().await;
}

#[tokio::test]
async fn shutdown_stops_listener() {
    let state = active("").await;
    let server = Running::start(stats_router(state)).await;
    let base_url = server.base_url.clone();

    server.stop().await;

    assert!(reqwest::get(format!("{base_url}/stats")).await.is_err());
}
