pub mod events;
pub mod server;

pub use events::{CapturedEvent, init_test_tracing};
pub use server::TestServer;
