use crate::engine::EngineError;
use crate::engine::snapshot::{SnapshotDocument, assemble};
use crate::statistic::{Feed, Scope, Statistic};
use crate::word::Word;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

/// One registered statistic and the feed the engine writes to.
///
/// The feed is taken out when the engine closes; the statistic stays so the
/// last known value remains readable.
struct Registration {
    name: Arc<str>,
    statistic: Arc<dyn Statistic>,
    feed: Option<Feed>,
}

/// Where one word has to be delivered.
pub(crate) struct Target {
    pub(crate) name: Arc<str>,
    pub(crate) sender: mpsc::Sender<Word>,
}

/// Registration list. Every lock is held for a short, non-awaiting section.
#[derive(Default)]
pub(crate) struct Store {
    registrations: RwLock<Vec<Registration>>,
}

impl Store {
    /// Start `statistic` listening and record it, unless its name is taken.
    pub(crate) fn register(
        &self,
        statistic: Arc<dyn Statistic>,
        scope: Scope,
    ) -> Result<(), EngineError> {
        let mut registrations = self.write();
        let name: Arc<str> = Arc::from(statistic.name());

        if registrations.iter().any(|r| r.name == name) {
            return Err(EngineError::DuplicateStatistic {
                name: name.to_string(),
            });
        }

        let feed = statistic
            .clone()
            .listen(scope)
            .map_err(|source| EngineError::Registration {
                name: name.to_string(),
                source,
            })?;

        registrations.push(Registration {
            name,
            statistic,
            feed: Some(feed),
        });

        Ok(())
    }

    /// Writers for every feed that is still held.
    pub(crate) fn targets(&self) -> Vec<Target> {
        self.read()
            .iter()
            .filter_map(|r| {
                r.feed.as_ref().map(|feed| Target {
                    name: r.name.clone(),
                    sender: feed.sender(),
                })
            })
            .collect()
    }

    pub(crate) fn document(&self) -> SnapshotDocument {
        let registrations = self.read();
        assemble(registrations.iter().map(|r| &r.statistic))
    }

    /// Hand out every held feed together with its statistic.
    pub(crate) fn take_feeds(&self) -> Vec<(Arc<dyn Statistic>, Feed)> {
        self.write()
            .iter_mut()
            .filter_map(|r| r.feed.take().map(|feed| (r.statistic.clone(), feed)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Registration>> {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Registration>> {
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
