//! Atomic transactions between layers and the renderer.
//!
//! A layer obtains an [`AtomicTransaction`] from
//! [`RendererController::create_atomic`](crate::RendererController::create_atomic),
//! queues manager operations onto it, and hands it back through
//! [`RendererController::queue_atomic`](crate::RendererController::queue_atomic).
//! The renderer applies the whole operation list as one step on its own thread.

use crate::{ManagerId, PrimitiveBatch, UpdatePolicy};

/// Renderer-issued identifier of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(u64);

impl TransactionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A single queued manager operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagerOp {
    /// Show or hide everything the manager draws.
    SetEnabled { manager: ManagerId, enabled: bool },
    /// Replace or patch the manager's objects.
    SetObjects {
        manager: ManagerId,
        objects: PrimitiveBatch,
        policy: UpdatePolicy,
    },
}

impl ManagerOp {
    /// The manager this operation targets.
    pub fn manager(&self) -> ManagerId {
        match self {
            ManagerOp::SetEnabled { manager, .. } | ManagerOp::SetObjects { manager, .. } => {
                *manager
            }
        }
    }
}

/// An ordered batch of manager operations applied all-or-nothing.
///
/// Not `Clone`: a transaction is submitted exactly once.
#[derive(Debug)]
pub struct AtomicTransaction {
    id: TransactionId,
    ops: Vec<ManagerOp>,
}

impl AtomicTransaction {
    /// Open an empty transaction. Called by renderer implementations.
    pub fn new(id: TransactionId) -> Self {
        Self {
            id,
            ops: Vec::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn ops(&self) -> &[ManagerOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<ManagerOp> {
        self.ops
    }

    pub(crate) fn push(&mut self, op: ManagerOp) {
        self.ops.push(op);
    }
}
