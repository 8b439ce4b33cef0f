//! The layer base: per-kind render managers behind one lock, and the
//! lifecycle every layer exposes.
//!
//! # Locking
//!
//! Each [`LayerCore`] owns a single `parking_lot::ReentrantMutex`. Every
//! operation that builds a transaction holds it from `create_atomic` until
//! `queue_atomic` returns, so transactions from one layer reach the renderer in
//! the order they were built and never interleave. The lock is re-entrant so
//! [`LayerCore::exclusive`] can group several operations.
//!
//! The renderer's manager factories run while the lock is held and must not
//! call back into the same layer.

use std::cell::RefCell;
use std::sync::{Arc, Weak};

use parking_lot::ReentrantMutex;
use skyweave_core::alloc::{HashMap, HashSet};
use skyweave_core::profiling::profile_function;
use skyweave_render::{
    AtomicTransaction, PrimitiveBatch, PrimitiveKind, PrimitiveSet, RenderManager,
    RendererController, UpdateClosure, UpdatePolicy,
};

use crate::{SearchResult, StringLookup};

/// Prefix of every layer preference id.
pub const PREFERENCE_ID_PREFIX: &str = "source_provider.";

/// Preference id for a layer with the given name id.
pub fn preference_id_for(name_id: u32) -> String {
    format!("{PREFERENCE_ID_PREFIX}{name_id}")
}

struct LayerState {
    /// Non-owning; the renderer outlives or replaces its layers.
    renderer: Option<Weak<dyn RendererController>>,
    /// Valid only for the renderer above.
    managers: HashMap<PrimitiveKind, RenderManager>,
    /// Last value passed to `set_visible`; survives renderer changes.
    visible: bool,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            renderer: None,
            managers: HashMap::new(),
            visible: true,
        }
    }
}

/// Shared state and transaction building for a layer.
///
/// Concrete layers embed a `LayerCore` and expose it through [`Layer::core`].
pub struct LayerCore {
    label: String,
    depth_order: i32,
    strings: Option<Arc<dyn StringLookup>>,
    state: ReentrantMutex<RefCell<LayerState>>,
}

impl LayerCore {
    /// `label` names the layer in log output. `depth_order` fixes the draw
    /// order of every manager this layer creates.
    pub fn new(label: impl Into<String>, depth_order: i32) -> Self {
        Self {
            label: label.into(),
            depth_order,
            strings: None,
            state: ReentrantMutex::new(RefCell::new(LayerState::default())),
        }
    }

    pub fn with_strings(mut self, strings: Arc<dyn StringLookup>) -> Self {
        self.strings = Some(strings);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn depth_order(&self) -> i32 {
        self.depth_order
    }

    pub fn strings(&self) -> Option<&Arc<dyn StringLookup>> {
        self.strings.as_ref()
    }

    /// Point the layer at a renderer, dropping managers owned by the previous one.
    ///
    /// Only the reference and the manager map change; repeating the call with
    /// the same renderer leaves the same state behind.
    pub fn attach(&self, renderer: &Arc<dyn RendererController>) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        let dropped = state.managers.len();
        state.managers.clear();
        state.renderer = Some(Arc::downgrade(renderer));
        tracing::debug!(
            layer = %self.label,
            dropped_managers = dropped,
            "registered with renderer"
        );
    }

    /// The registered renderer, if it is set and still alive.
    pub fn renderer(&self) -> Option<Arc<dyn RendererController>> {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.renderer.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_registered(&self) -> bool {
        self.renderer().is_some()
    }

    /// The manager currently serving `kind`, if one was created.
    pub fn manager(&self, kind: PrimitiveKind) -> Option<RenderManager> {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.managers.get(&kind).cloned()
    }

    /// The visibility last requested through [`set_visible`](Self::set_visible).
    pub fn is_visible(&self) -> bool {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.visible
    }

    pub fn manager_count(&self) -> usize {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.managers.len()
    }

    /// Run `f` while holding the layer lock.
    ///
    /// Operations called from `f` re-enter the lock, so their transactions are
    /// submitted back to back with nothing from other threads in between.
    pub fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.state.lock();
        f()
    }

    /// Enable or disable every manager this layer has created, in one transaction.
    ///
    /// The transaction is submitted even when no managers exist yet. The value
    /// is remembered even without a renderer: managers created while the
    /// layer is hidden are disabled in the transaction that creates them.
    pub fn set_visible(&self, visible: bool) {
        profile_function!();
        let guard = self.state.lock();
        guard.borrow_mut().visible = visible;
        let Some(renderer) = self.registered_renderer(&guard, "set_visible") else {
            return;
        };

        let mut transaction = renderer.create_atomic();
        {
            let state = guard.borrow();
            for manager in state.managers.values() {
                manager.queue_enabled(visible, &mut transaction);
            }
        }
        tracing::trace!(
            layer = %self.label,
            visible,
            ops = transaction.len(),
            "submitting visibility transaction"
        );
        renderer.queue_atomic(transaction);
    }

    /// Replace everything this layer draws with `primitives`.
    pub fn redraw(&self, primitives: PrimitiveSet) {
        self.redraw_with(primitives, UpdatePolicy::RESET);
    }

    /// Route each primitive kind of `primitives` to its manager, applying
    /// `policy`, all inside one transaction.
    pub fn redraw_with(&self, mut primitives: PrimitiveSet, policy: UpdatePolicy) {
        profile_function!();
        let guard = self.state.lock();
        let Some(renderer) = self.registered_renderer(&guard, "redraw") else {
            return;
        };

        let mut transaction = renderer.create_atomic();
        {
            let mut state = guard.borrow_mut();
            let visible = state.visible;
            for kind in PrimitiveKind::ALL {
                self.set_sources(
                    &mut state.managers,
                    visible,
                    renderer.as_ref(),
                    primitives.take(kind),
                    policy,
                    &mut transaction,
                );
            }
        }
        tracing::trace!(
            layer = %self.label,
            ?policy,
            ops = transaction.len(),
            "submitting redraw transaction"
        );
        renderer.queue_atomic(transaction);
    }

    /// Register a per-frame callback with the current renderer.
    ///
    /// Returns false if no renderer is registered.
    pub fn add_update_closure(&self, closure: UpdateClosure) -> bool {
        match self.renderer() {
            Some(renderer) => {
                renderer.add_update_closure(closure);
                true
            }
            None => {
                tracing::debug!(layer = %self.label, "no renderer; update closure not added");
                false
            }
        }
    }

    pub fn remove_update_closure(&self, closure: &UpdateClosure) {
        if let Some(renderer) = self.renderer() {
            renderer.remove_update_closure(closure);
        }
    }

    fn registered_renderer(
        &self,
        guard: &RefCell<LayerState>,
        operation: &str,
    ) -> Option<Arc<dyn RendererController>> {
        let state = guard.borrow();
        match &state.renderer {
            None => {
                tracing::warn!(layer = %self.label, "renderer not set; skipping {}", operation);
                None
            }
            Some(weak) => {
                let renderer = weak.upgrade();
                if renderer.is_none() {
                    tracing::warn!(layer = %self.label, "renderer dropped; skipping {}", operation);
                }
                renderer
            }
        }
    }

    /// Queue `batch` on the manager for its kind, creating the manager on the
    /// first non-empty batch. A manager created while the layer is hidden is
    /// disabled before it receives objects.
    fn set_sources(
        &self,
        managers: &mut HashMap<PrimitiveKind, RenderManager>,
        visible: bool,
        renderer: &dyn RendererController,
        batch: PrimitiveBatch,
        policy: UpdatePolicy,
        transaction: &mut AtomicTransaction,
    ) {
        let kind = batch.kind();
        if batch.is_empty() {
            // Nothing to clear if this kind never had a manager.
            if let Some(manager) = managers.get(&kind) {
                tracing::trace!(layer = %self.label, %kind, "clearing manager");
                manager.queue_objects(batch, policy, transaction);
            }
            return;
        }

        let manager = managers.entry(kind).or_insert_with(|| {
            let manager = renderer.create_manager(kind, self.depth_order);
            tracing::debug!(
                layer = %self.label,
                %kind,
                manager = manager.id().raw(),
                depth = self.depth_order,
                "created render manager"
            );
            if !visible {
                manager.queue_enabled(false, transaction);
            }
            manager
        });
        tracing::trace!(layer = %self.label, %kind, count = batch.len(), "queueing objects");
        manager.queue_objects(batch, policy, transaction);
    }
}

impl std::fmt::Debug for LayerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerCore")
            .field("label", &self.label)
            .field("depth_order", &self.depth_order)
            .field("managers", &self.manager_count())
            .finish_non_exhaustive()
    }
}

/// A logical group of sky content managed as a unit.
///
/// Implementors provide [`core`](Layer::core), [`name_id`](Layer::name_id)
/// and a full [`redraw`](Layer::redraw); the lifecycle methods have default
/// implementations on top of [`LayerCore`].
pub trait Layer: Send + Sync {
    fn core(&self) -> &LayerCore;

    /// Resource id of this layer's display name.
    fn name_id(&self) -> u32;

    /// Rebuild every primitive from scratch and submit them.
    fn redraw(&self);

    /// Load or compute initial state. Called once by the layer manager.
    fn initialize(&self) {}

    /// Called after [`register_with_renderer`](Layer::register_with_renderer)
    /// swapped renderers; repopulates the new renderer.
    fn on_renderer_changed(&self) {}

    fn register_with_renderer(&self, renderer: &Arc<dyn RendererController>) {
        self.core().attach(renderer);
        self.on_renderer_changed();
    }

    fn set_visible(&self, visible: bool) {
        self.core().set_visible(visible);
    }

    fn depth_order(&self) -> i32 {
        self.core().depth_order()
    }

    fn layer_name(&self) -> String {
        self.core()
            .strings()
            .and_then(|strings| strings.string(self.name_id()))
            .unwrap_or_else(|| self.preference_id())
    }

    fn preference_id(&self) -> String {
        preference_id_for(self.name_id())
    }

    /// Objects named exactly `name` (ignoring case). Layers are not searchable
    /// unless they override this.
    fn search_by_object_name(&self, _name: &str) -> Vec<SearchResult> {
        Vec::new()
    }

    fn object_names_matching_prefix(&self, _prefix: &str) -> HashSet<String> {
        HashSet::new()
    }
}
