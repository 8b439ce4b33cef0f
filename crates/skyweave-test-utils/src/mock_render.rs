//! Mock implementation of `RendererController` for testing.
//!
//! Records every boundary call without drawing anything.

use parking_lot::Mutex;
use skyweave_render::{
    AtomicTransaction, ManagerId, ManagerOp, PrimitiveKind, RenderManager, RendererController,
    TransactionId, UpdateClosure,
};

/// Records a renderer call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererCall {
    CreateAtomic {
        transaction: TransactionId,
    },
    QueueAtomic {
        transaction: TransactionId,
        ops: Vec<ManagerOp>,
    },
    CreateManager {
        manager: ManagerId,
        kind: PrimitiveKind,
        depth_order: i32,
    },
    AddUpdateClosure {
        closure_id: u64,
    },
    RemoveUpdateClosure {
        closure_id: u64,
    },
}

/// A transaction as it was handed to `queue_atomic`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedTransaction {
    pub id: TransactionId,
    pub ops: Vec<ManagerOp>,
}

impl SubmittedTransaction {
    /// Operations in this transaction that target `manager`.
    pub fn ops_for(&self, manager: ManagerId) -> Vec<&ManagerOp> {
        self.ops.iter().filter(|op| op.manager() == manager).collect()
    }
}

/// Mock renderer for layer tests.
///
/// Methods take `&self`; recorded state sits behind `parking_lot::Mutex` so the
/// mock is `Send + Sync` like a real renderer and can be driven from several
/// threads at once.
#[derive(Debug, Default)]
pub struct MockRenderer {
    calls: Mutex<Vec<RendererCall>>,
    closures: Mutex<Vec<UpdateClosure>>,
    next_manager_id: Mutex<u64>,
    next_transaction_id: Mutex<u64>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RendererCall> {
        self.calls.lock().clone()
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn count_create_atomic(&self) -> usize {
        self.count(|call| matches!(call, RendererCall::CreateAtomic { .. }))
    }

    pub fn count_queue_atomic(&self) -> usize {
        self.count(|call| matches!(call, RendererCall::QueueAtomic { .. }))
    }

    /// Count manager creations for one primitive kind.
    pub fn count_manager_creates(&self, kind: PrimitiveKind) -> usize {
        self.count(|call| matches!(call, RendererCall::CreateManager { kind: k, .. } if *k == kind))
    }

    pub fn count_all_manager_creates(&self) -> usize {
        self.count(|call| matches!(call, RendererCall::CreateManager { .. }))
    }

    /// Ids of managers created for `kind`, in creation order.
    pub fn managers_created(&self, kind: PrimitiveKind) -> Vec<ManagerId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RendererCall::CreateManager {
                    manager, kind: k, ..
                } if *k == kind => Some(*manager),
                _ => None,
            })
            .collect()
    }

    /// Every submitted transaction, in submission order.
    pub fn submitted(&self) -> Vec<SubmittedTransaction> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RendererCall::QueueAtomic { transaction, ops } => Some(SubmittedTransaction {
                    id: *transaction,
                    ops: ops.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn last_submitted(&self) -> Option<SubmittedTransaction> {
        self.submitted().pop()
    }

    pub fn update_closure_count(&self) -> usize {
        self.closures.lock().len()
    }

    /// Simulate one renderer frame by running every registered closure.
    pub fn run_update_closures(&self) {
        let closures = self.closures.lock().clone();
        for closure in &closures {
            closure.run();
        }
    }

    fn count(&self, predicate: impl Fn(&RendererCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(*call)).count()
    }

    fn new_manager(&self, kind: PrimitiveKind, depth_order: i32) -> RenderManager {
        let mut next = self.next_manager_id.lock();
        let manager = ManagerId::new(*next);
        *next += 1;

        self.calls.lock().push(RendererCall::CreateManager {
            manager,
            kind,
            depth_order,
        });

        RenderManager::new(manager, kind, depth_order)
    }
}

impl RendererController for MockRenderer {
    fn create_atomic(&self) -> AtomicTransaction {
        let mut next = self.next_transaction_id.lock();
        let transaction = TransactionId::new(*next);
        *next += 1;

        self.calls
            .lock()
            .push(RendererCall::CreateAtomic { transaction });
        AtomicTransaction::new(transaction)
    }

    fn queue_atomic(&self, transaction: AtomicTransaction) {
        let id = transaction.id();
        tracing::trace!("mock renderer received transaction {:?}", id);
        self.calls.lock().push(RendererCall::QueueAtomic {
            transaction: id,
            ops: transaction.into_ops(),
        });
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
        self.calls.lock().push(RendererCall::AddUpdateClosure {
            closure_id: closure.id(),
        });
        self.closures.lock().push(closure);
    }

    fn remove_update_closure(&self, closure: &UpdateClosure) {
        self.calls.lock().push(RendererCall::RemoveUpdateClosure {
            closure_id: closure.id(),
        });
        self.closures.lock().retain(|c| c != closure);
    }
}
