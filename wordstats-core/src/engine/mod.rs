mod errors;
mod processor;
mod snapshot;
mod store;

#[cfg(test)]
mod tests;

pub use errors::EngineError;
pub use processor::Engine;
pub use snapshot::SnapshotDocument;
