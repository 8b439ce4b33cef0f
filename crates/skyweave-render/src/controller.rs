//! The renderer boundary consumed by layers.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{AtomicTransaction, PrimitiveKind, RenderManager};

/// Controller side of a renderer that runs on its own (draw) thread.
///
/// Implementations must apply each submitted transaction atomically and apply
/// transactions in the order they were queued.
pub trait RendererController: Send + Sync {
    /// Open a new, empty transaction.
    fn create_atomic(&self) -> AtomicTransaction;

    /// Submit a transaction for asynchronous application. Never blocks on the
    /// draw thread.
    fn queue_atomic(&self, transaction: AtomicTransaction);

    fn create_point_manager(&self, depth_order: i32) -> RenderManager;
    fn create_line_manager(&self, depth_order: i32) -> RenderManager;
    fn create_label_manager(&self, depth_order: i32) -> RenderManager;
    fn create_image_manager(&self, depth_order: i32) -> RenderManager;

    /// Create a manager for `kind` using the matching factory.
    fn create_manager(&self, kind: PrimitiveKind, depth_order: i32) -> RenderManager {
        match kind {
            PrimitiveKind::Point => self.create_point_manager(depth_order),
            PrimitiveKind::Line => self.create_line_manager(depth_order),
            PrimitiveKind::Text => self.create_label_manager(depth_order),
            PrimitiveKind::Image => self.create_image_manager(depth_order),
        }
    }

    /// Register a callback the renderer runs once per frame on its own thread.
    fn add_update_closure(&self, closure: UpdateClosure);

    /// Unregister a callback previously passed to
    /// [`add_update_closure`](Self::add_update_closure).
    fn remove_update_closure(&self, closure: &UpdateClosure);
}

static NEXT_CLOSURE_ID: AtomicU64 = AtomicU64::new(1);

/// A per-frame callback registered with a renderer.
///
/// Clones share the callback and compare equal, so the clone kept by the
/// registrant can later be used to unregister it.
#[derive(Clone)]
pub struct UpdateClosure {
    id: u64,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl UpdateClosure {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            id: NEXT_CLOSURE_ID.fetch_add(1, Ordering::Relaxed),
            callback: Arc::new(callback),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn run(&self) {
        (self.callback)();
    }
}

impl PartialEq for UpdateClosure {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UpdateClosure {}

impl fmt::Debug for UpdateClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateClosure")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
