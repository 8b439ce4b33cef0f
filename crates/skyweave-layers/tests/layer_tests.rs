//! Transaction and manager lifecycle tests for `LayerCore` (no renderer thread
//! required; the mock records every boundary call).

use std::sync::Arc;
use std::thread;

use glam::Vec3;
use skyweave_layers::{Layer, LayerCore};
use skyweave_render::{
    Color, ImagePrimitive, LinePrimitive, ManagerOp, PointPrimitive, PrimitiveBatch,
    PrimitiveKind, PrimitiveSet, RendererController, TextPrimitive, UpdatePolicy,
};
use skyweave_test_utils::MockRenderer;

const DEPTH: i32 = 30;

struct TestLayer {
    core: LayerCore,
}

impl TestLayer {
    fn new() -> Self {
        Self {
            core: LayerCore::new("test", DEPTH),
        }
    }
}

impl Layer for TestLayer {
    fn core(&self) -> &LayerCore {
        &self.core
    }

    fn name_id(&self) -> u32 {
        4
    }

    fn redraw(&self) {
        self.core.redraw(PrimitiveSet::new().with_points(points(1)));
    }
}

fn points(n: usize) -> Vec<PointPrimitive> {
    (0..n)
        .map(|i| PointPrimitive::new(Vec3::new(i as f32, 0.0, 1.0).normalize(), Color::WHITE, 2.0))
        .collect()
}

fn registered() -> (TestLayer, Arc<MockRenderer>) {
    let mock = Arc::new(MockRenderer::new());
    let layer = TestLayer::new();
    let renderer: Arc<dyn RendererController> = mock.clone();
    layer.register_with_renderer(&renderer);
    (layer, mock)
}

#[test]
fn test_operations_before_registration_are_noops() {
    let layer = TestLayer::new();

    layer.set_visible(true);
    layer.set_visible(false);
    layer.core().redraw(PrimitiveSet::new().with_points(points(3)));

    assert!(!layer.core().is_registered());
    assert_eq!(layer.core().manager_count(), 0);
    // Remembered for managers created after registration.
    assert!(!layer.core().is_visible());
}

#[test]
fn test_manager_created_while_hidden_starts_disabled() {
    let (layer, mock) = registered();
    layer.set_visible(false);

    layer.core().redraw(PrimitiveSet::new().with_points(points(2)));

    let point_manager = mock.managers_created(PrimitiveKind::Point)[0];
    let txn = mock.last_submitted().expect("redraw transaction");
    match txn.ops.as_slice() {
        [
            ManagerOp::SetEnabled { manager: hidden, enabled: false },
            ManagerOp::SetObjects { manager, objects, .. },
        ] => {
            assert_eq!(*hidden, point_manager);
            assert_eq!(*manager, point_manager);
            assert_eq!(objects.len(), 2);
        }
        other => panic!("unexpected ops: {other:?}"),
    }

    // Existing managers are not toggled again by later redraws.
    layer.core().redraw(PrimitiveSet::new().with_points(points(4)));
    let txn = mock.last_submitted().expect("redraw transaction");
    assert!(matches!(txn.ops.as_slice(), [ManagerOp::SetObjects { .. }]));
}

#[test]
fn test_redraw_after_late_registration_creates_managers() {
    let layer = TestLayer::new();
    layer.core().redraw(PrimitiveSet::new().with_points(points(3)));
    assert_eq!(layer.core().manager_count(), 0);

    let mock = Arc::new(MockRenderer::new());
    let renderer: Arc<dyn RendererController> = mock.clone();
    layer.register_with_renderer(&renderer);
    layer.redraw();

    assert_eq!(mock.count_manager_creates(PrimitiveKind::Point), 1);
    assert_eq!(mock.count_queue_atomic(), 1);
}

#[test]
fn test_empty_batches_never_create_managers() {
    let (layer, mock) = registered();

    layer.core().redraw(PrimitiveSet::new());

    assert_eq!(mock.count_all_manager_creates(), 0);
    let txn = mock.last_submitted().expect("one transaction");
    assert!(txn.ops.is_empty());
}

#[test]
fn test_manager_created_once_and_reused() {
    let (layer, mock) = registered();

    layer.core().redraw(PrimitiveSet::new().with_points(points(2)));
    let first = layer.core().manager(PrimitiveKind::Point).expect("point manager");
    layer.core().redraw(PrimitiveSet::new().with_points(points(5)));
    let second = layer.core().manager(PrimitiveKind::Point).expect("point manager");

    assert_eq!(first, second);
    assert_eq!(mock.count_manager_creates(PrimitiveKind::Point), 1);
    assert_eq!(first.depth_order(), DEPTH);

    let submitted = mock.submitted();
    assert_eq!(submitted.len(), 2);
    for txn in &submitted {
        assert_eq!(txn.ops_for(first.id()).len(), 1);
    }
}

#[test]
fn test_reregistration_discards_managers() {
    let (layer, mock) = registered();
    layer.core().redraw(PrimitiveSet::new().with_points(points(2)));
    assert!(layer.core().manager(PrimitiveKind::Point).is_some());

    let other = Arc::new(MockRenderer::new());
    let renderer: Arc<dyn RendererController> = other.clone();
    layer.register_with_renderer(&renderer);
    assert_eq!(layer.core().manager_count(), 0);

    layer.core().redraw(PrimitiveSet::new().with_points(points(2)));
    assert_eq!(other.count_manager_creates(PrimitiveKind::Point), 1);
    assert_eq!(mock.count_manager_creates(PrimitiveKind::Point), 1);
    assert!(layer.core().manager(PrimitiveKind::Point).is_some());

    // Transactions now go to the new renderer only.
    assert_eq!(mock.count_queue_atomic(), 1);
    assert_eq!(other.count_queue_atomic(), 1);
}

#[test]
fn test_reregistration_with_same_renderer_recreates_managers() {
    let (layer, mock) = registered();
    layer.core().redraw(PrimitiveSet::new().with_points(points(1)));

    let renderer: Arc<dyn RendererController> = mock.clone();
    layer.register_with_renderer(&renderer);
    layer.register_with_renderer(&renderer);
    assert_eq!(layer.core().manager_count(), 0);

    layer.core().redraw(PrimitiveSet::new().with_points(points(1)));
    assert_eq!(mock.count_manager_creates(PrimitiveKind::Point), 2);
}

#[test]
fn test_one_transaction_per_call_across_kinds() {
    let (layer, mock) = registered();

    let primitives = PrimitiveSet::new()
        .with_points(points(3))
        .with_labels(vec![TextPrimitive::new(Vec3::X, "Polaris", Color::WHITE)])
        .with_lines(vec![LinePrimitive::new(vec![Vec3::X, Vec3::Y], Color::RED, 1.5)])
        .with_images(vec![ImagePrimitive::new(Vec3::Z, 9, Vec3::Y, 0.03)]);
    layer.core().redraw(primitives);
    layer.set_visible(false);

    assert_eq!(mock.count_create_atomic(), 2);
    assert_eq!(mock.count_queue_atomic(), 2);
    assert_eq!(mock.count_all_manager_creates(), 4);

    let submitted = mock.submitted();
    assert_eq!(submitted[0].ops.len(), 4);
    assert!(
        submitted[0]
            .ops
            .iter()
            .all(|op| matches!(op, ManagerOp::SetObjects { policy, .. } if policy.is_reset()))
    );
    assert_eq!(submitted[1].ops.len(), 4);
    assert!(
        submitted[1]
            .ops
            .iter()
            .all(|op| matches!(op, ManagerOp::SetEnabled { enabled: false, .. }))
    );
}

#[test]
fn test_set_visible_without_managers_still_submits() {
    let (layer, mock) = registered();

    layer.set_visible(true);
    layer.set_visible(false);

    assert_eq!(mock.count_create_atomic(), 2);
    assert_eq!(mock.count_queue_atomic(), 2);
    assert!(mock.submitted().iter().all(|txn| txn.ops.is_empty()));
    assert_eq!(mock.count_all_manager_creates(), 0);
}

#[test]
fn test_incremental_empty_redraw_clears_existing_manager_only() {
    let (layer, mock) = registered();

    layer.core().redraw(PrimitiveSet::new().with_points(points(3)));
    layer
        .core()
        .redraw_with(PrimitiveSet::new(), UpdatePolicy::UPDATE_POSITIONS);

    assert_eq!(mock.count_manager_creates(PrimitiveKind::Point), 1);
    assert_eq!(mock.count_manager_creates(PrimitiveKind::Line), 0);

    let point_manager = mock.managers_created(PrimitiveKind::Point)[0];
    let submitted = mock.submitted();
    assert_eq!(submitted.len(), 2);

    match submitted[0].ops.as_slice() {
        [ManagerOp::SetObjects { manager, objects, policy }] => {
            assert_eq!(*manager, point_manager);
            assert_eq!(objects.len(), 3);
            assert_eq!(*policy, UpdatePolicy::RESET);
        }
        other => panic!("unexpected first transaction: {other:?}"),
    }
    match submitted[1].ops.as_slice() {
        [ManagerOp::SetObjects { manager, objects, policy }] => {
            assert_eq!(*manager, point_manager);
            assert_eq!(*objects, PrimitiveBatch::empty(PrimitiveKind::Point));
            assert_eq!(*policy, UpdatePolicy::UPDATE_POSITIONS);
        }
        other => panic!("unexpected second transaction: {other:?}"),
    }
}

#[test]
fn test_dropped_renderer_degrades_to_noop() {
    let layer = TestLayer::new();
    {
        let mock = Arc::new(MockRenderer::new());
        let renderer: Arc<dyn RendererController> = mock.clone();
        layer.register_with_renderer(&renderer);
    }

    assert!(!layer.core().is_registered());
    layer.set_visible(true);
    layer.redraw();
    assert_eq!(layer.core().manager_count(), 0);
}

#[test]
fn test_exclusive_groups_transactions() {
    let (layer, mock) = registered();

    layer.core().exclusive(|| {
        layer.core().redraw(PrimitiveSet::new().with_points(points(1)));
        layer.set_visible(false);
    });

    let submitted = mock.submitted();
    assert_eq!(submitted.len(), 2);
    assert!(matches!(submitted[0].ops[0], ManagerOp::SetObjects { .. }));
    assert!(matches!(submitted[1].ops[0], ManagerOp::SetEnabled { enabled: false, .. }));
}

#[test]
fn test_concurrent_toggle_and_redraw_serialize() {
    let mock = Arc::new(MockRenderer::new());
    let layer = Arc::new(TestLayer::new());
    let renderer: Arc<dyn RendererController> = mock.clone();
    layer.register_with_renderer(&renderer);
    // Create both managers up front so every toggle touches two managers.
    layer
        .core()
        .redraw(PrimitiveSet::new().with_points(points(1)).with_lines(vec![
            LinePrimitive::new(vec![Vec3::X, Vec3::Z], Color::RED, 1.0),
        ]));

    const ROUNDS: usize = 200;
    let toggler = {
        let layer = layer.clone();
        thread::spawn(move || {
            for i in 0..ROUNDS {
                layer.set_visible(i % 2 == 0);
            }
        })
    };
    let redrawer = {
        let layer = layer.clone();
        thread::spawn(move || {
            for i in 0..ROUNDS {
                layer.core().redraw(
                    PrimitiveSet::new()
                        .with_points(points(i % 4 + 1))
                        .with_lines(vec![LinePrimitive::new(
                            vec![Vec3::X, Vec3::Y],
                            Color::RED,
                            1.0,
                        )]),
                );
            }
        })
    };
    toggler.join().expect("toggle thread panicked");
    redrawer.join().expect("redraw thread panicked");

    let submitted = mock.submitted();
    assert_eq!(submitted.len(), 2 * ROUNDS + 1);
    assert_eq!(mock.count_all_manager_creates(), 2);

    for txn in &submitted {
        assert_eq!(txn.ops.len(), 2, "transaction {:?} is partial", txn.id);
        let toggles = txn
            .ops
            .iter()
            .filter(|op| matches!(op, ManagerOp::SetEnabled { .. }))
            .count();
        assert!(
            toggles == 0 || toggles == txn.ops.len(),
            "transaction {:?} mixes a toggle with object updates",
            txn.id
        );
    }

    // Submission order equals creation order: the lock spans both calls.
    let ids: Vec<_> = submitted.iter().map(|txn| txn.id.raw()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn test_layer_name_falls_back_to_preference_id() {
    let layer = TestLayer::new();
    assert_eq!(layer.preference_id(), "source_provider.4");
    assert_eq!(layer.layer_name(), "source_provider.4");
    assert!(layer.search_by_object_name("Polaris").is_empty());
    assert!(layer.object_names_matching_prefix("P").is_empty());
}

#[test]
fn test_layer_name_from_string_table() {
    let mut strings = std::collections::HashMap::new();
    strings.insert(4_u32, "Stars".to_owned());
    let layer = TestLayer {
        core: LayerCore::new("test", DEPTH).with_strings(Arc::new(strings)),
    };
    assert_eq!(layer.layer_name(), "Stars");
}
