use crate::statistic::{Statistic, StatisticError};
use crate::word::Word;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Words a feed buffers before writers have to wait.
pub const DEFAULT_FEED_CAPACITY: usize = 10;

/// What a statistic needs to start listening: the cancellation token it must
/// observe and the size of its feed buffer.
#[derive(Debug, Clone)]
pub struct Scope {
    token: CancellationToken,
    feed_capacity: usize,
}

impl Scope {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }

    pub fn with_feed_capacity(mut self, feed_capacity: usize) -> Self {
        self.feed_capacity = feed_capacity;
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn feed_capacity(&self) -> usize {
        self.feed_capacity
    }
}

/// Write side of a statistic's input, paired with the task draining it.
#[derive(Debug)]
pub struct Feed {
    sender: mpsc::Sender<Word>,
    task: JoinHandle<()>,
}

impl Feed {
    /// Enqueue one word, waiting while the buffer is full.
    ///
    /// Fails, handing the word back, once the draining task has stopped.
    #[cfg(test)]
    pub(crate) async fn send(&self, word: Word) -> Result<(), Word> {
        self.sender.send(word).await.map_err(|e| e.0)
    }

    /// A cloned writer, for dispatching without holding on to the feed.
    pub fn sender(&self) -> mpsc::Sender<Word> {
        self.sender.clone()
    }

    /// True once the draining task no longer accepts words.
    #[cfg(test)]
    pub(crate) fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// True once the draining task has returned.
    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Drop this writer and wait for the draining task to return.
    ///
    /// Without cancellation the task first applies every word still buffered
    /// (and waits for any other writer clone to be dropped).
    pub async fn release(self) {
        let Feed { sender, task } = self;
        drop(sender);

        if let Err(e) = task.await {
            warn!(error = %e, "statistic drain task did not finish cleanly");
        }
    }
}

/// Spawn the drain task shared by all statistic implementations.
///
/// `apply` is called once per received word, in feed order, unless the
/// statistic has been closed in the meantime. Cancellation wins over a
/// pending word when both are ready.
pub fn spawn_listener<S, F>(
    statistic: Arc<S>,
    scope: Scope,
    apply: F,
) -> Result<Feed, StatisticError>
where
    S: Statistic + ?Sized,
    F: Fn(&S, Word) + Send + 'static,
{
    let name = statistic.name().to_owned();

    if scope.feed_capacity == 0 {
        return Err(StatisticError::listen(name, "feed capacity must be non-zero"));
    }

    let handle =
        Handle::try_current().map_err(|e| StatisticError::listen(name.as_str(), e.to_string()))?;

    let (sender, mut receiver) = mpsc::channel::<Word>(scope.feed_capacity);
    let token = scope.token;

    let task = handle.spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    if statistic.close().is_ok() {
                        debug!(statistic = %name, "statistic closed on cancellation");
                    }
                    break;
                }

                next = receiver.recv() => {
                    let Some(word) = next else {
                        trace!(statistic = %name, "feed exhausted");
                        break;
                    };

                    if statistic.is_closed() {
                        trace!(statistic = %name, "dropping word for closed statistic");
                        break;
                    }

                    apply(statistic.as_ref(), word);
                }
            }
        }
    });

    Ok(Feed { sender, task })
}
