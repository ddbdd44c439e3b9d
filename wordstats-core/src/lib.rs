pub mod conf;
pub mod engine;
pub mod logging;
pub mod runtime;
pub mod server;
pub mod statistic;
pub mod word;
pub mod word_log;
