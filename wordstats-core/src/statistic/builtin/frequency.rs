use crate::statistic::Observation;
use crate::statistic::rank;
use crate::word::Word;
use ahash::RandomState;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Word → frequency map behind its own lock.
///
/// A whole batch of keys is recorded under one lock acquisition, so a
/// snapshot never sees part of a word applied.
#[derive(Debug, Default)]
pub(crate) struct FrequencyTable {
    counts: Mutex<HashMap<Word, u64, RandomState>>,
}

impl FrequencyTable {
    pub(crate) fn record(&self, key: Word) {
        *self.counts().entry(key).or_insert(0) += 1;
    }

    pub(crate) fn record_all(&self, keys: impl IntoIterator<Item = Word>) {
        let mut counts = self.counts();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    pub(crate) fn top(&self, limit: usize) -> Vec<Observation> {
        let observations = self
            .counts()
            .iter()
            .map(|(key, frequency)| Observation::new(key.clone(), *frequency))
            .collect();

        rank::top(observations, limit)
    }

    // Counters stay valid if a holder panicked mid-update: every update is a
    // single increment.
    fn counts(&self) -> MutexGuard<'_, HashMap<Word, u64, RandomState>> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
