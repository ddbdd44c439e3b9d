use crate::statistic::StatisticError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is closed")]
    Closed,

    #[error("failed to register statistic '{name}'")]
    Registration {
        name: String,
        #[source]
        source: StatisticError,
    },

    #[error("a statistic named '{name}' is already registered")]
    DuplicateStatistic { name: String },

    #[error("failed to close statistic '{name}'")]
    Close {
        name: String,
        #[source]
        source: StatisticError,
    },

    #[error("feed for statistic '{name}' stopped accepting words")]
    FeedClosed { name: String },

    #[error("failed to read input stream: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write snapshot: {0}")]
    Write(#[source] std::io::Error),
}
