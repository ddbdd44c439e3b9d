use crate::harness::{CapturedEvent, init_test_tracing};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wordstats_core::conf::{StatsConfig, WordstatsConfig};
use wordstats_core::server::{run_ingest, run_stats};

/// Handle to a running ingest + stats pair sharing one word log.
///
/// Both listeners stop when the handle is dropped.
pub struct TestServer {
    ingest_url: String,
    stats_url: String,
    log_path: PathBuf,
    client: Client,
    shutdown: CancellationToken,
    _dir: TempDir,
}

impl TestServer {
    /// Start both listeners on free ports with a fresh word log.
    ///
    /// The stats listener reloads every second.
    pub fn start() -> Self {
        init_test_tracing(events());

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let log_path = dir.path().join("data.txt");

        let ingest_port = free_port();
        let stats_port = free_port();

        let cfg = WordstatsConfig {
            stats: StatsConfig {
                reload_interval_secs: 1,
                ..StatsConfig::default()
            },
            ..WordstatsConfig::default()
        }
        .with_log_path(&log_path)
        .with_ingest_port(ingest_port)
        .and_then(|cfg| cfg.with_stats_port(stats_port))
        .expect("failed to patch ports");

        let shutdown = CancellationToken::new();
        let server_shutdown = shutdown.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");

            runtime.block_on(async move {
                let (ingest, stats) = tokio::join!(
                    run_ingest(&cfg, server_shutdown.clone()),
                    run_stats(&cfg, server_shutdown.clone()),
                );
                ingest.expect("ingest listener failed");
                stats.expect("stats listener failed");
            });
        });

        wait_for_server(ingest_port);
        wait_for_server(stats_port);

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("failed to build client");

        Self {
            ingest_url: format!("http://127.0.0.1:{ingest_port}"),
            stats_url: format!("http://127.0.0.1:{stats_port}"),
            log_path,
            client,
            shutdown,
            _dir: dir,
        }
    }

    pub fn post_words(&self, text: &str) -> Response {
        self.client
            .post(format!("{}/", self.ingest_url))
            .body(text.to_string())
            .send()
            .expect("ingest request failed")
    }

    pub fn get_stats(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.stats_url, path))
            .send()
            .expect("stats request failed")
    }

    pub fn stats(&self) -> Value {
        let res = self.get_stats("/stats");
        assert_eq!(res.status(), 200);
        serde_json::from_str(&res.text().expect("unreadable body")).expect("invalid json")
    }

    /// Poll `/stats` until it returns `expected`, panicking after a few reloads.
    pub fn wait_for_stats(&self, expected: &Value) {
        let deadline = Instant::now() + Duration::from_secs(5);

        loop {
            let current = self.stats();
            if &current == expected {
                return;
            }
            if Instant::now() > deadline {
                panic!("stats never reached {expected}, last seen {current}");
            }
            thread::sleep(Duration::from_millis(100));
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Events captured from every server in this test binary.
    pub fn events(&self) -> Vec<CapturedEvent> {
        events().lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Poll until the port accepts connections (or panic).
fn wait_for_server(port: u16) {
    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(("127.0.0.1", port)) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start on port {port}");
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
