//! Utility modules: configuration, logging, error and trace helpers

pub mod config;
pub mod error;
pub mod logger;
pub mod trace;
