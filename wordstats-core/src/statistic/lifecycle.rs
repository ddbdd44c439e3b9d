use crate::statistic::StatisticError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Open/closed flag shared by every statistic implementation.
///
/// Invariants:
/// - The flag moves from open to closed at most once
/// - Exactly one caller observes that transition as a success
#[derive(Debug, Default)]
pub struct Lifecycle {
    closed: AtomicBool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self, name: &str) -> Result<(), StatisticError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StatisticError::closed(name));
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
