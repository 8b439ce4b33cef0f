//! Test utilities for Skyweave.
//!
//! The main component is `MockRenderer` (requires the `mock` feature), a
//! [`RendererController`](skyweave_render::RendererController) that records
//! every call made across the renderer boundary instead of drawing anything.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use skyweave_render::{PrimitiveKind, RendererController};
//! use skyweave_test_utils::MockRenderer;
//!
//! let mock = MockRenderer::new();
//! let manager = mock.create_manager(PrimitiveKind::Point, 10);
//! let mut txn = mock.create_atomic();
//! manager.queue_enabled(false, &mut txn);
//! mock.queue_atomic(txn);
//!
//! assert_eq!(mock.count_manager_creates(PrimitiveKind::Point), 1);
//! assert_eq!(mock.submitted().len(), 1);
//! # }
//! ```
//!
//! Mock state lives behind `parking_lot::Mutex`, so `&self` methods can record
//! calls and the mock can be shared with a layer through `Arc`.

#[cfg(feature = "mock")]
pub mod mock_render;

#[cfg(feature = "mock")]
pub use mock_render::*;
