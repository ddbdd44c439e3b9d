use crate::statistic::{Snapshot, Statistic};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Statistic name → current value, keys in sorted order.
pub type SnapshotDocument = BTreeMap<String, Snapshot>;

pub(crate) fn assemble<'a>(
    statistics: impl IntoIterator<Item = &'a Arc<dyn Statistic>>,
) -> SnapshotDocument {
    statistics
        .into_iter()
        .map(|statistic| (statistic.name().to_owned(), statistic.retrieve()))
        .collect()
}
