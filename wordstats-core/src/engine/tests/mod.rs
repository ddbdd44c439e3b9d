
use crate::statistic::{
    Feed, Lifecycle, Observation, Scope, Snapshot, Statistic, StatisticError, spawn_listener,
};
use crate::word::Word;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const SAMPLE_INPUT: &str = "This Is Four Words";

//-----------------------------------------------------------------------------
// Test statistics
//-----------------------------------------------------------------------------

/// Records every word it receives, in order.
pub(crate) struct RecordingStatistic {
    name: String,
    lifecycle: Lifecycle,
    words: Mutex<Vec<Word>>,
}

impl RecordingStatistic {
    pub(crate) fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            lifecycle: Lifecycle::new(),
            words: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn words(&self) -> Vec<String> {
        self.words
            .lock()
            .unwrap()
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    fn push(&self, word: Word) {
        self.words.lock().unwrap().push(word);
    }
}

impl Statistic for RecordingStatistic {
    fn listen(self: Arc<Self>, scope: Scope) -> Result<Feed, StatisticError> {
        spawn_listener(self, scope, RecordingStatistic::push)
    }

    fn retrieve(&self) -> Snapshot {
        let observations = self
            .words
            .lock()
            .unwrap()
            .iter()
            .map(|w| Observation::new(w.clone(), 1))
            .collect();
        Snapshot::Ranked(observations)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&self) -> Result<(), StatisticError> {
        self.lifecycle.close(&self.name)
    }

    fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }
}

/// Refuses to listen.
pub(crate) struct BrokenStatistic;

impl Statistic for BrokenStatistic {
    fn listen(self: Arc<Self>, _scope: Scope) -> Result<Feed, StatisticError> {
        Err(StatisticError::listen("broken", "no listener available"))
    }

    fn retrieve(&self) -> Snapshot {
        Snapshot::Count(0)
    }

    fn name(&self) -> &str {
        "broken"
    }

    fn close(&self) -> Result<(), StatisticError> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Takes a few milliseconds per word, so feeds stay full.
pub(crate) struct SlowStatistic {
    name: String,
    lifecycle: Lifecycle,
    applied: AtomicU64,
}

impl SlowStatistic {
    pub(crate) fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            lifecycle: Lifecycle::new(),
            applied: AtomicU64::new(0),
        })
    }

    fn apply(&self, _word: Word) {
        std::thread::sleep(Duration::from_millis(5));
        self.applied.fetch_add(1, Ordering::Relaxed);
    }
}

impl Statistic for SlowStatistic {
    fn listen(self: Arc<Self>, scope: Scope) -> Result<Feed, StatisticError> {
        spawn_listener(self, scope, SlowStatistic::apply)
    }

    fn retrieve(&self) -> Snapshot {
        Snapshot::Count(self.applied.load(Ordering::Relaxed))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&self) -> Result<(), StatisticError> {
        self.lifecycle.close(&self.name)
    }

    fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }
}
