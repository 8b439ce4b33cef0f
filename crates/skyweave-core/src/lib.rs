//! Skyweave Core
//!
//! Shared utilities for the Skyweave crates: logging setup, profiling,
//! runtime configuration, hash collections and math re-exports.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::{Config, ProfilingMode};
