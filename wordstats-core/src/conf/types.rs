use crate::conf::ConfigError;
use crate::statistic::DEFAULT_FEED_CAPACITY;
use crate::statistic::catalog::{StatisticKind, default_kinds};
use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const WORDS_FILE: &str = "data.txt";
const DEFAULT_INGEST_LISTEN: &str = "0.0.0.0:5555";
const DEFAULT_STATS_LISTEN: &str = "0.0.0.0:8080";
const DEFAULT_RELOAD_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WordstatsConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Append-only file that received words are written to.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
        }
    }
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(WORDS_FILE)
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// e.g. "0.0.0.0:5555"
    #[serde(default = "default_ingest_listen")]
    pub listen: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            listen: default_ingest_listen(),
        }
    }
}

fn default_ingest_listen() -> String {
    DEFAULT_INGEST_LISTEN.to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// e.g. "0.0.0.0:8080"
    #[serde(default = "default_stats_listen")]
    pub listen: String,

    /// How often the served statistics are rebuilt from the word log.
    #[serde(default = "default_reload_interval_secs")]
    pub reload_interval_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            listen: default_stats_listen(),
            reload_interval_secs: default_reload_interval_secs(),
        }
    }
}

impl StatsConfig {
    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_interval_secs)
    }
}

fn default_stats_listen() -> String {
    DEFAULT_STATS_LISTEN.to_string()
}

fn default_reload_interval_secs() -> u64 {
    DEFAULT_RELOAD_INTERVAL_SECS
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,

    /// Registered in this order.
    #[serde(default = "default_kinds")]
    pub statistics: Vec<StatisticKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feed_capacity: default_feed_capacity(),
            statistics: default_kinds(),
        }
    }
}

fn default_feed_capacity() -> usize {
    DEFAULT_FEED_CAPACITY
}

//-----------------------------------------------------------------------------
// Overrides
//-----------------------------------------------------------------------------

impl WordstatsConfig {
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log.path = path.into();
        self
    }

    pub fn with_ingest_port(mut self, port: u16) -> Result<Self, ConfigError> {
        self.ingest.listen = with_port(&self.ingest.listen, port)?;
        Ok(self)
    }

    pub fn with_stats_port(mut self, port: u16) -> Result<Self, ConfigError> {
        self.stats.listen = with_port(&self.stats.listen, port)?;
        Ok(self)
    }
}

fn with_port(listen: &str, port: u16) -> Result<String, ConfigError> {
    let mut addr = parse_listen_addr(listen)?;
    addr.set_port(port);
    Ok(addr.to_string())
}

pub(crate) fn parse_listen_addr(listen: &str) -> Result<SocketAddr, ConfigError> {
    listen
        .parse()
        .map_err(|_| ConfigError::InvalidListenerAddr {
            addr: listen.to_string(),
        })
}

//-----------------------------------------------------------------------------
// Validation
//-----------------------------------------------------------------------------

impl WordstatsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ingest = parse_listen_addr(&self.ingest.listen)?;
        let stats = parse_listen_addr(&self.stats.listen)?;
        if ingest == stats {
            return Err(ConfigError::DuplicateListenerAddr {
                addr: ingest.to_string(),
            });
        }

        if self.stats.reload_interval_secs == 0 {
            return Err(ConfigError::ZeroReloadInterval);
        }

        self.engine.validate()
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_capacity == 0 {
            return Err(ConfigError::ZeroFeedCapacity);
        }

        if self.statistics.is_empty() {
            return Err(ConfigError::NoStatistics);
        }

        let mut seen = HashSet::new();
        for kind in &self.statistics {
            if !seen.insert(kind) {
                return Err(ConfigError::DuplicateStatistic { kind: *kind });
            }
        }

        Ok(())
    }
}
