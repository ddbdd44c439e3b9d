use crate::word::Word;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// A key seen `frequency` times. Serializes as the bare key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub key: Word,
    pub frequency: u64,
}

impl Observation {
    pub fn new(key: Word, frequency: u64) -> Self {
        Self { key, frequency }
    }
}

impl Serialize for Observation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

/// Reduce observations to the `limit` most frequent, presented by key.
///
/// Ties on frequency keep the lexicographically smaller keys, so the result
/// does not depend on the order observations arrive in.
pub fn top(mut observations: Vec<Observation>, limit: usize) -> Vec<Observation> {
    observations.sort_unstable_by(by_frequency_desc);
    observations.truncate(limit);
    observations.sort_unstable_by(|a, b| a.key.cmp(&b.key));
    observations
}

fn by_frequency_desc(a: &Observation, b: &Observation) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.key.cmp(&b.key))
}
