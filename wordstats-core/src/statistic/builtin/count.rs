use crate::statistic::{
    Feed, Lifecycle, Scope, Snapshot, Statistic, StatisticError, spawn_listener,
};
use crate::word::Word;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

const NAME: &str = "count";

/// Counts every word received, the empty word included.
#[derive(Debug, Default)]
pub struct Count {
    lifecycle: Lifecycle,
    counter: AtomicU64,
}

impl Count {
    pub fn new() -> Self {
        Self::default()
    }

    fn increment(&self, _word: Word) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Statistic for Count {
    fn listen(self: Arc<Self>, scope: Scope) -> Result<Feed, StatisticError> {
        spawn_listener(self, scope, Count::increment)
    }

    fn retrieve(&self) -> Snapshot {
        Snapshot::Count(self.counter.load(Ordering::Relaxed))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn close(&self) -> Result<(), StatisticError> {
        self.lifecycle.close(NAME)
    }

    fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }
}
