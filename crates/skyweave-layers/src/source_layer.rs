//! Layers assembled from [`Source`]s.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use skyweave_core::alloc::HashSet;
use skyweave_render::{PrimitiveSet, RendererController, UpdateClosure, UpdatePolicy};

use crate::search::SearchIndex;
use crate::{Layer, LayerCore, SearchResult, Source, StringLookup};

/// Static description of a [`SourceLayer`].
#[derive(Debug, Clone)]
pub struct SourceLayerConfig {
    /// Name used in log output.
    pub label: String,
    /// Resource id of the display name; also keys the preference id.
    pub name_id: u32,
    pub depth_order: i32,
    /// Poll every source once per renderer frame and redraw what changed.
    pub poll_sources: bool,
    /// Index source names for search.
    pub searchable: bool,
}

impl SourceLayerConfig {
    pub fn new(label: impl Into<String>, name_id: u32, depth_order: i32) -> Self {
        Self {
            label: label.into(),
            name_id,
            depth_order,
            poll_sources: false,
            searchable: false,
        }
    }

    pub fn polling(mut self, poll_sources: bool) -> Self {
        self.poll_sources = poll_sources;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }
}

struct PollRegistration {
    renderer: Weak<dyn RendererController>,
    closure: UpdateClosure,
}

/// A layer whose primitives are the union of its sources' primitives.
///
/// Created through [`SourceLayer::new`], which returns an `Arc` because the
/// polling closure registered with the renderer keeps a weak reference back to
/// the layer.
pub struct SourceLayer {
    core: LayerCore,
    config: SourceLayerConfig,
    sources: Mutex<Vec<Box<dyn Source>>>,
    index: RwLock<SearchIndex>,
    poller: Mutex<Option<PollRegistration>>,
    this: Weak<SourceLayer>,
}

impl SourceLayer {
    pub fn new(config: SourceLayerConfig, sources: Vec<Box<dyn Source>>) -> Arc<Self> {
        Self::build(config, sources, None)
    }

    pub fn with_strings(
        config: SourceLayerConfig,
        sources: Vec<Box<dyn Source>>,
        strings: Arc<dyn StringLookup>,
    ) -> Arc<Self> {
        Self::build(config, sources, Some(strings))
    }

    fn build(
        config: SourceLayerConfig,
        sources: Vec<Box<dyn Source>>,
        strings: Option<Arc<dyn StringLookup>>,
    ) -> Arc<Self> {
        let mut core = LayerCore::new(config.label.clone(), config.depth_order);
        if let Some(strings) = strings {
            core = core.with_strings(strings);
        }
        Arc::new_cyclic(|this| SourceLayer {
            core,
            config,
            sources: Mutex::new(sources),
            index: RwLock::new(SearchIndex::default()),
            poller: Mutex::new(None),
            this: this.clone(),
        })
    }

    pub fn config(&self) -> &SourceLayerConfig {
        &self.config
    }

    pub fn source_count(&self) -> usize {
        self.sources.lock().len()
    }

    /// Whether a polling closure is currently installed with a renderer.
    pub fn is_polling(&self) -> bool {
        self.poller.lock().is_some()
    }

    /// Gather every source's primitives and submit them under `policy`.
    ///
    /// Gathering and submission happen under the layer lock, so a concurrent
    /// reset cannot be overtaken by an older incremental update.
    pub fn refresh_sources(&self, policy: UpdatePolicy) {
        self.core.exclusive(|| {
            let primitives = self.gather();
            self.core.redraw_with(primitives, policy);
        });
    }

    /// Poll every source once and redraw with the union of reported changes.
    ///
    /// Returns the combined policy; empty means nothing was redrawn.
    pub fn poll_sources(&self) -> UpdatePolicy {
        self.core.exclusive(|| {
            let mut changes = UpdatePolicy::empty();
            for source in self.sources.lock().iter_mut() {
                changes |= source.update();
            }
            if !changes.is_empty() {
                tracing::trace!(layer = %self.config.label, ?changes, "sources changed");
                self.refresh_sources(changes);
            }
            changes
        })
    }

    fn gather(&self) -> PrimitiveSet {
        let mut primitives = PrimitiveSet::new();
        for source in self.sources.lock().iter() {
            source.append_to(&mut primitives);
        }
        primitives
    }

    /// Move the polling closure to the current renderer.
    fn install_poller(&self) {
        let mut poller = self.poller.lock();
        if let Some(previous) = poller.take() {
            if let Some(renderer) = previous.renderer.upgrade() {
                renderer.remove_update_closure(&previous.closure);
            }
        }

        let Some(renderer) = self.core.renderer() else {
            return;
        };
        let this = self.this.clone();
        let closure = UpdateClosure::new(move || {
            if let Some(layer) = this.upgrade() {
                layer.poll_sources();
            }
        });
        renderer.add_update_closure(closure.clone());
        *poller = Some(PollRegistration {
            renderer: Arc::downgrade(&renderer),
            closure,
        });
    }
}

impl Layer for SourceLayer {
    fn core(&self) -> &LayerCore {
        &self.core
    }

    fn name_id(&self) -> u32 {
        self.config.name_id
    }

    fn redraw(&self) {
        self.refresh_sources(UpdatePolicy::RESET);
    }

    fn initialize(&self) {
        let mut index = SearchIndex::default();
        {
            let mut sources = self.sources.lock();
            for source in sources.iter_mut() {
                let primitives = source.initialize();
                if !self.config.searchable {
                    continue;
                }
                if let Some(location) = primitives.search_location() {
                    for name in primitives.names() {
                        index.insert(SearchResult::new(name.clone(), location));
                    }
                }
            }
        }
        tracing::debug!(
            layer = %self.config.label,
            sources = self.source_count(),
            indexed_names = index.len(),
            "initialized sources"
        );
        *self.index.write() = index;

        self.refresh_sources(UpdatePolicy::RESET);
    }

    fn on_renderer_changed(&self) {
        self.refresh_sources(UpdatePolicy::RESET);
        if self.config.poll_sources {
            self.install_poller();
        }
    }

    fn search_by_object_name(&self, name: &str) -> Vec<SearchResult> {
        self.index.read().find(name).cloned().into_iter().collect()
    }

    fn object_names_matching_prefix(&self, prefix: &str) -> HashSet<String> {
        self.index.read().names_with_prefix(prefix)
    }
}

impl Drop for SourceLayer {
    fn drop(&mut self) {
        if let Some(registration) = self.poller.get_mut().take() {
            if let Some(renderer) = registration.renderer.upgrade() {
                renderer.remove_update_closure(&registration.closure);
            }
        }
    }
}

impl std::fmt::Debug for SourceLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceLayer")
            .field("config", &self.config)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}
