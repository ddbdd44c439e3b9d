pub mod builtin;
pub mod catalog;
pub mod errors;
mod lifecycle;
mod listener;
pub mod rank;
mod snapshot;

#[cfg(test)]
mod tests;

pub use errors::StatisticError;
pub use lifecycle::Lifecycle;
pub use listener::{DEFAULT_FEED_CAPACITY, Feed, Scope, spawn_listener};
pub use rank::Observation;
pub use snapshot::Snapshot;

use std::sync::Arc;

/// A unit of running state fed with normalized words.
///
/// A statistic owns its counters exclusively. The engine only pushes words
/// through the [`Feed`] returned by [`Statistic::listen`] and reads values
/// back through [`Statistic::retrieve`], so implementations must tolerate
/// both happening at the same time.
pub trait Statistic: Send + Sync + 'static {
    /// Start draining a new feed.
    ///
    /// Spawns one background task that applies every received word until the
    /// feed is exhausted or the scope's token is cancelled. On cancellation
    /// the statistic closes itself and stops draining.
    fn listen(self: Arc<Self>, scope: Scope) -> Result<Feed, StatisticError>;

    /// Current value. Never observes a half-applied word.
    fn retrieve(&self) -> Snapshot;

    /// Stable key of this statistic in the snapshot document.
    fn name(&self) -> &str;

    /// Mark the statistic closed. Only the first call succeeds.
    fn close(&self) -> Result<(), StatisticError>;

    fn is_closed(&self) -> bool;
}
