use super::TOP_LIMIT;
use super::frequency::FrequencyTable;
use crate::statistic::{
    Feed, Lifecycle, Scope, Snapshot, Statistic, StatisticError, spawn_listener,
};
use crate::word::Word;
use std::sync::Arc;

const NAME: &str = "top_5_words";

/// The five most frequent words.
#[derive(Debug, Default)]
pub struct TopWords {
    lifecycle: Lifecycle,
    words: FrequencyTable,
}

impl TopWords {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, word: Word) {
        self.words.record(word);
    }
}

impl Statistic for TopWords {
    fn listen(self: Arc<Self>, scope: Scope) -> Result<Feed, StatisticError> {
        spawn_listener(self, scope, TopWords::record)
    }

    fn retrieve(&self) -> Snapshot {
        Snapshot::Ranked(self.words.top(TOP_LIMIT))
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
