use crate::statistic::catalog::StatisticKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    //-------------------------------------------------------------------------
    // Listeners
    //-------------------------------------------------------------------------
    #[error("invalid listener socket address '{addr}'")]
    InvalidListenerAddr { addr: String },

    #[error("ingest and stats listeners cannot share address '{addr}'")]
    DuplicateListenerAddr { addr: String },

    #[error("reload interval must be at least one second")]
    ZeroReloadInterval,

    //-------------------------------------------------------------------------
    // Engine
    //-------------------------------------------------------------------------
    #[error("feed capacity must be at least 1")]
    ZeroFeedCapacity,

    #[error("at least one statistic must be enabled")]
    NoStatistics,

    #[error("statistic '{kind}' is listed more than once")]
    DuplicateStatistic { kind: StatisticKind },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
