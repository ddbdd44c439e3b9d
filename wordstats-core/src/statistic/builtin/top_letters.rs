use super::TOP_LIMIT;
use super::frequency::FrequencyTable;
use crate::statistic::{
    Feed, Lifecycle, Scope, Snapshot, Statistic, StatisticError, spawn_listener,
};
use crate::word::Word;
use std::sync::Arc;

const NAME: &str = "top_5_letters";

/// The five most frequent characters across all words.
///
/// Words are already normalized, so only letters and digits are counted.
#[derive(Debug, Default)]
pub struct TopLetters {
    lifecycle: Lifecycle,
    letters: FrequencyTable,
}

impl TopLetters {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, word: Word) {
        self.letters.record_all(word.letters());
    }
}

impl Statistic for TopLetters {
    fn listen(self: Arc<Self>, scope: Scope) -> Result<Feed, StatisticError> {
        spawn_listener(self, scope, TopLetters::record)
    }

    fn retrieve(&self) -> Snapshot {
        Snapshot::Ranked(self.letters.top(TOP_LIMIT))
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
