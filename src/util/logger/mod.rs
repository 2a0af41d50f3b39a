//! Logger module
//!
//! Go-style simple logging: `[LEVEL] message`
//!
//! # Usage
//!
//! ```rust
//! use expected::util::logger;
//!
//! logger::init();
//! tracing::info!("Hello, {}", "world");
//! ```

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, Layer, Registry,
};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Initialize logger with default configuration (INFO level)
pub fn init() {
    init_with_level(LogLevel::Info);
}

/// Initialize logger with custom level (Go style: `[LEVEL] message`)
///
/// Panics if a global subscriber is already installed.
pub fn init_with_level(level: LogLevel) {
    if let Err(err) = try_init_with_level(level) {
        panic!("failed to install logger: {}", err);
    }
}

/// Like [`init_with_level`], but reports an already-installed subscriber
/// instead of panicking.
pub fn try_init_with_level(level: LogLevel) -> Result<(), TryInitError> {
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level.into());

    // No timestamps, no module path, no colors.
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).try_init()
}

/// Initialize logger for debug use (DEBUG level)
pub fn init_debug() {
    init_with_level(LogLevel::Debug);
}

/// Initialize logger for tests: TRACE level, ignoring a second install.
pub fn init_test() {
    let _ = try_init_with_level(LogLevel::Trace);
}
