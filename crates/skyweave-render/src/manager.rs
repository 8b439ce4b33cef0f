use crate::{AtomicTransaction, ManagerOp, PrimitiveBatch, PrimitiveKind, UpdatePolicy};

/// Renderer-issued identifier of a render manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManagerId(u64);

impl ManagerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Handle to the renderer-side owner of every primitive of one kind that a
/// layer contributes.
///
/// A manager is only valid for the renderer that created it. It never
/// changes renderer state directly: both operations append to an open
/// [`AtomicTransaction`] and take effect when the renderer applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderManager {
    id: ManagerId,
    kind: PrimitiveKind,
    depth_order: i32,
}

impl RenderManager {
    /// Called by renderer implementations from their manager factories.
    pub fn new(id: ManagerId, kind: PrimitiveKind, depth_order: i32) -> Self {
        Self {
            id,
            kind,
            depth_order,
        }
    }

    pub fn id(&self) -> ManagerId {
        self.id
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Draw order fixed at creation; lower values draw first.
    pub fn depth_order(&self) -> i32 {
        self.depth_order
    }

    /// Queue a visibility change.
    pub fn queue_enabled(&self, enabled: bool, transaction: &mut AtomicTransaction) {
        transaction.push(ManagerOp::SetEnabled {
            manager: self.id,
            enabled,
        });
    }

    /// Queue a new object set, applied according to `policy`.
    pub fn queue_objects(
        &self,
        objects: PrimitiveBatch,
        policy: UpdatePolicy,
        transaction: &mut AtomicTransaction,
    ) {
        debug_assert_eq!(
            objects.kind(),
            self.kind,
            "batch routed to a manager of another kind"
        );
        transaction.push(ManagerOp::SetObjects {
            manager: self.id,
            objects,
            policy,
        });
    }
}
