use crate::statistic::Statistic;
use crate::statistic::builtin::{Count, TopLetters, TopWords};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Built-in statistics that can be named in configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatisticKind {
    Count,
    TopWords,
    TopLetters,
}

impl StatisticKind {
    pub fn build(self) -> Arc<dyn Statistic> {
        match self {
            StatisticKind::Count => Arc::new(Count::new()),
            StatisticKind::TopWords => Arc::new(TopWords::new()),
            StatisticKind::TopLetters => Arc::new(TopLetters::new()),
        }
    }
}

impl Display for StatisticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatisticKind::Count => "count",
            StatisticKind::TopWords => "top_words",
            StatisticKind::TopLetters => "top_letters",
        };
        f.write_str(s)
    }
}

/// Every built-in statistic, in registration order.
pub fn default_kinds() -> Vec<StatisticKind> {
    vec![
        StatisticKind::TopLetters,
        StatisticKind::TopWords,
        StatisticKind::Count,
    ]
}

/// Fresh instances for `kinds`, in the given order.
pub fn build_statistics(kinds: &[StatisticKind]) -> Vec<Arc<dyn Statistic>> {
    kinds.iter().map(|kind| kind.build()).collect()
}
