//! In-process reference renderer.
//!
//! [`SceneRenderer`] keeps the renderer-side state of every manager in a
//! [`Scene`] and applies queued transactions when the draw thread calls
//! [`SceneRenderer::apply_pending`]. Each transaction is applied under a single
//! write lock, so anything reading the scene through
//! [`SceneRenderer::with_scene`] sees either none or all of it.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use skyweave_core::profiling::profile_function;

use crate::{
    AtomicTransaction, ManagerId, ManagerOp, PrimitiveBatch, PrimitiveKind, RenderManager,
    RendererController, TransactionId, UpdateClosure,
};

/// Renderer-side state of one manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerState {
    pub id: ManagerId,
    pub depth_order: i32,
    pub enabled: bool,
    pub objects: PrimitiveBatch,
}

impl ManagerState {
    pub fn kind(&self) -> PrimitiveKind {
        self.objects.kind()
    }

    /// Objects that would be drawn this frame.
    pub fn visible_len(&self) -> usize {
        if self.enabled { self.objects.len() } else { 0 }
    }
}

/// Everything the draw thread renders.
#[derive(Debug, Default)]
pub struct Scene {
    managers: BTreeMap<ManagerId, ManagerState>,
    applied: u64,
    last_applied: Option<TransactionId>,
}

impl Scene {
    pub fn manager(&self, id: ManagerId) -> Option<&ManagerState> {
        self.managers.get(&id)
    }

    pub fn manager_count(&self) -> usize {
        self.managers.len()
    }

    /// Number of transactions applied so far.
    pub fn applied_transactions(&self) -> u64 {
        self.applied
    }

    pub fn last_applied(&self) -> Option<TransactionId> {
        self.last_applied
    }

    /// Managers in draw order: by depth, then creation order.
    pub fn draw_order(&self) -> Vec<&ManagerState> {
        let mut states: Vec<_> = self.managers.values().collect();
        states.sort_by_key(|state| (state.depth_order, state.id));
        states
    }

    /// Total objects currently visible across all managers.
    pub fn visible_objects(&self) -> usize {
        self.managers.values().map(ManagerState::visible_len).sum()
    }

    fn insert_manager(&mut self, manager: &RenderManager) {
        self.managers.insert(
            manager.id(),
            ManagerState {
                id: manager.id(),
                depth_order: manager.depth_order(),
                enabled: true,
                objects: PrimitiveBatch::empty(manager.kind()),
            },
        );
    }

    fn apply(&mut self, transaction: AtomicTransaction) {
        let id = transaction.id();
        for op in transaction.into_ops() {
            let Some(state) = self.managers.get_mut(&op.manager()) else {
                tracing::warn!(
                    "transaction {:?} targets unknown manager {:?}; skipping op",
                    id,
                    op.manager()
                );
                continue;
            };
            match op {
                ManagerOp::SetEnabled { enabled, .. } => state.enabled = enabled,
                ManagerOp::SetObjects {
                    objects, policy, ..
                } => state.objects.apply(objects, policy),
            }
        }
        self.applied += 1;
        self.last_applied = Some(id);
    }
}

/// A [`RendererController`] that applies transactions to an in-memory [`Scene`].
#[derive(Debug, Default)]
pub struct SceneRenderer {
    next_manager_id: AtomicU64,
    next_transaction_id: AtomicU64,
    pending: Mutex<VecDeque<AtomicTransaction>>,
    scene: RwLock<Scene>,
    closures: Mutex<Vec<UpdateClosure>>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions queued but not yet applied.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Apply every queued transaction in submission order.
    ///
    /// Returns the number of transactions applied.
    pub fn apply_pending(&self) -> usize {
        profile_function!();
        let drained: Vec<_> = self.pending.lock().drain(..).collect();
        let count = drained.len();
        for transaction in drained {
            self.scene.write().apply(transaction);
        }
        if count > 0 {
            tracing::trace!("applied {} transaction(s)", count);
        }
        count
    }

    /// Run every registered update closure once.
    ///
    /// The registry lock is released before callbacks run, so a callback may
    /// register or unregister closures.
    pub fn run_update_closures(&self) {
        let closures = self.closures.lock().clone();
        for closure in &closures {
            closure.run();
        }
    }

    /// One draw-thread frame: run update closures, then apply transactions.
    pub fn frame(&self) -> usize {
        skyweave_core::profiling::new_frame();
        self.run_update_closures();
        self.apply_pending()
    }

    pub fn update_closure_count(&self) -> usize {
        self.closures.lock().len()
    }

    /// Read the scene under its lock.
    pub fn with_scene<R>(&self, f: impl FnOnce(&Scene) -> R) -> R {
        f(&self.scene.read())
    }

    fn new_manager(&self, kind: PrimitiveKind, depth_order: i32) -> RenderManager {
        let id = ManagerId::new(self.next_manager_id.fetch_add(1, Ordering::Relaxed));
        let manager = RenderManager::new(id, kind, depth_order);
        self.scene.write().insert_manager(&manager);
        tracing::debug!("created {} manager {:?} at depth {}", kind, id, depth_order);
        manager
    }
}

impl RendererController for SceneRenderer {
    fn create_atomic(&self) -> AtomicTransaction {
        AtomicTransaction::new(TransactionId::new(
            self.next_transaction_id.fetch_add(1, Ordering::Relaxed),
        ))
    }

    fn queue_atomic(&self, transaction: AtomicTransaction) {
        self.pending.lock().push_back(transaction);
    }

    fn create_point_manager(&self, depth_order: i32) -> RenderManager {
        self.new_manager(PrimitiveKind::Point, depth_order)
    }

    fn create_line_manager(&self, depth_order: i32) -> RenderManager {
        self.new_manager(PrimitiveKind::Line, depth_order)
    }

    fn create_label_manager(&self, depth_order: i32) -> RenderManager {
        self.new_manager(PrimitiveKind::Text, depth_order)
    }

    fn create_image_manager(&self, depth_order: i32) -> RenderManager {
        self.new_manager(PrimitiveKind::Image, depth_order)
    }

    fn add_update_closure(&self, closure: UpdateClosure) {
        let mut closures = self.closures.lock();
        if !closures.contains(&closure) {
            closures.push(closure);
        }
    }

    fn remove_update_closure(&self, closure: &UpdateClosure) {
        self.closures.lock().retain(|c| c != closure);
    }
}
