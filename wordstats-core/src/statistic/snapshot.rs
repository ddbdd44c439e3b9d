use crate::statistic::Observation;
use serde::Serialize;

/// The externally visible value of a statistic.
///
/// Renders as an integer for counters and as an array of bare strings for
/// list-shaped statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Count(u64),
    Ranked(Vec<Observation>),
}

impl Snapshot {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Snapshot::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Keys of a list-shaped snapshot, in presentation order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Snapshot::Count(_) => Vec::new(),
            Snapshot::Ranked(observations) => observations.iter().map(|o| o.key.as_str()).collect(),
        }
    }
}
