//! `env_logger` setup for the `log` facade used throughout the crate.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
