//! Fan-out engine.
//!
//! The engine reads a byte stream, normalizes every whitespace-delimited
//! token and hands each word to every registered statistic through that
//! statistic's own bounded feed. Statistics update independently; the engine
//! only coordinates delivery, snapshots and shutdown.
//!
//! ```text
//! reader -> words() -> Engine::process -> Feed (one per statistic) -> drain task
//!                                                                      |
//! Engine::write <- SnapshotDocument <- Statistic::retrieve <-----------+
//! ```

use crate::engine::EngineError;
use crate::engine::snapshot::SnapshotDocument;
use crate::engine::store::{Store, Target};
use crate::statistic::{DEFAULT_FEED_CAPACITY, Scope, Statistic};
use crate::word::{Word, words};
use futures::future::try_join_all;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct Engine {
    token: CancellationToken,
    feed_capacity: usize,
    closed: AtomicBool,
    store: Store,
}

impl Engine {
    /// An open engine whose scope is a child of `parent`.
    ///
    /// Cancelling `parent` tears down every statistic registered here, just
    /// as [`Engine::close`] does.
    pub fn new(parent: &CancellationToken) -> Self {
        Self::with_feed_capacity(parent, DEFAULT_FEED_CAPACITY)
    }

    pub fn with_feed_capacity(parent: &CancellationToken, feed_capacity: usize) -> Self {
        Self {
            token: parent.child_token(),
            feed_capacity,
            closed: AtomicBool::new(false),
            store: Store::default(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of statistics registered so far.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start `statistic` listening and add it to the fan-out.
    ///
    /// A statistic registered while [`Engine::process`] runs receives the
    /// words of the next line onwards.
    pub fn register(&self, statistic: Arc<dyn Statistic>) -> Result<(), EngineError> {
        if self.is_closed() {
            return Err(EngineError::Closed);
        }

        let name = statistic.name().to_owned();
        let scope = Scope::new(self.token.child_token()).with_feed_capacity(self.feed_capacity);

        self.store.register(statistic, scope)?;
        debug!(statistic = %name, "statistic registered");

        Ok(())
    }

    /// Deliver every word of `reader` to every registered statistic.
    ///
    /// Returns once each word has been enqueued on every feed, not once it has
    /// been applied. The result is the number of words dispatched.
    pub async fn process<R>(&self, reader: R) -> Result<u64, EngineError>
    where
        R: AsyncRead + Unpin,
    {
        if self.is_closed() {
            return Err(EngineError::Closed);
        }

        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        let mut dispatched = 0u64;

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(EngineError::Read)?;

            if read == 0 {
                break;
            }

            // Words are never delivered once the engine has started closing.
            if self.is_closed() {
                return Err(EngineError::Closed);
            }

            let text = String::from_utf8_lossy(&line);
            let targets = self.store.targets();

            for word in words(&text) {
                if let Err(e) = dispatch(&targets, word).await {
                    // Feeds of a closing engine stop accepting words.
                    return Err(if self.is_closed() {
                        EngineError::Closed
                    } else {
                        e
                    });
                }
                dispatched += 1;
            }
        }

        debug!(words = dispatched, "input processed");
        Ok(dispatched)
    }

    /// Current value of every registered statistic.
    pub fn snapshot(&self) -> SnapshotDocument {
        self.store.document()
    }

    /// Serialize [`Engine::snapshot`] to `sink` as one JSON line.
    ///
    /// Also valid after close: the document then holds the values the
    /// statistics had when they stopped.
    pub fn write<W: Write>(&self, mut sink: W) -> Result<(), EngineError> {
        let document = self.snapshot();

        serde_json::to_writer(&mut sink, &document).map_err(EngineError::Serialize)?;
        sink.write_all(b"\n").map_err(EngineError::Write)?;
        sink.flush().map_err(EngineError::Write)
    }

    /// Cancel every statistic and release every feed. Only the first close
    /// (or [`Engine::finish`]) succeeds.
    ///
    /// Words still buffered in a feed are dropped.
    pub async fn close(&self) -> Result<(), EngineError> {
        self.mark_closed()?;
        self.token.cancel();

        let feeds = self.store.take_feeds();
        let count = feeds.len();
        let mut first_error = None;

        for (statistic, feed) in feeds {
            if let Err(e) = close_statistic(statistic.as_ref()) {
                first_error.get_or_insert(e);
            }
            feed.release().await;
        }

        info!(statistics = count, "engine closed");
        first_error.map_or(Ok(()), Err)
    }

    /// Close after every buffered word has been applied.
    ///
    /// Feeds are released first and each drain task runs until its feed is
    /// exhausted; only then is the scope cancelled and every statistic closed.
    pub async fn finish(&self) -> Result<(), EngineError> {
        self.mark_closed()?;

        let feeds = self.store.take_feeds();
        let count = feeds.len();
        let mut statistics = Vec::with_capacity(count);

        for (statistic, feed) in feeds {
            feed.release().await;
            statistics.push(statistic);
        }

        self.token.cancel();
        let mut first_error = None;
        for statistic in &statistics {
            if let Err(e) = close_statistic(statistic.as_ref()) {
                first_error.get_or_insert(e);
            }
        }

        info!(statistics = count, "engine finished");
        first_error.map_or(Ok(()), Err)
    }

    fn mark_closed(&self) -> Result<(), EngineError> {
        self.closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| EngineError::Closed)
    }
}

/// Enqueue `word` on every target concurrently; wait for all of them.
async fn dispatch(targets: &[Target], word: Word) -> Result<(), EngineError> {
    try_join_all(targets.iter().map(|target| {
        let word = word.clone();
        async move {
            target
                .sender
                .send(word)
                .await
                .map_err(|_| EngineError::FeedClosed {
                    name: target.name.to_string(),
                })
        }
    }))
    .await?;

    Ok(())
}

// The drain task may already have closed the statistic in reaction to
// cancellation; that is the same transition observed twice.
fn close_statistic(statistic: &dyn Statistic) -> Result<(), EngineError> {
    match statistic.close() {
        Ok(()) => Ok(()),
        Err(e) if e.is_closed() => {
            debug!(statistic = statistic.name(), "statistic already closed");
            Ok(())
        }
        Err(source) => Err(EngineError::Close {
            name: statistic.name().to_owned(),
            source,
        }),
    }
}
