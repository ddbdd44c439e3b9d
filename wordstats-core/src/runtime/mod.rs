mod state;
#[cfg(test)]
mod tests;

pub use state::{ActiveEngine, build_engine, build_engine_from_log, reload_engine, run_reload_loop};
