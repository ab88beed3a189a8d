#![doc = include_str!("../README.md")]

pub mod config;
pub mod env;
pub mod error;
pub mod logger;

// Re-exports for convenience
pub use config::ClientConfig;
pub use error::{BootstrapError, Result};
pub use logger::{AuthLogger, LogHandler, LogLevel, LoggerConfig};
