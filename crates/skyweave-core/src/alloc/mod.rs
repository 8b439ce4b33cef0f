//! Hash collections used across Skyweave.
//!
//! Re-exports AHash-backed maps and sets so every crate hashes the same way.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
