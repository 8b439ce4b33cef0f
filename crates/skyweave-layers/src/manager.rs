//! Owning collection of layers, addressed by preference id.

use std::sync::Arc;

use parking_lot::Mutex;
use skyweave_core::alloc::{HashMap, HashSet};
use skyweave_render::RendererController;

use crate::{Layer, LayerError, LayerResult, SearchResult};

/// Holds every layer of the application and remembers the visibility the
/// user asked for, so it can be re-applied whenever managers may have been
/// recreated (after initialization and after a renderer change).
pub struct LayerManager {
    layers: Vec<Arc<dyn Layer>>,
    by_preference_id: HashMap<String, usize>,
    visibility: Mutex<HashMap<String, bool>>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            by_preference_id: HashMap::new(),
            visibility: Mutex::new(HashMap::new()),
        }
    }

    /// Add a layer. Layers start visible.
    pub fn add(&mut self, layer: Arc<dyn Layer>) -> LayerResult<()> {
        let preference_id = layer.preference_id();
        if self.by_preference_id.contains_key(&preference_id) {
            return Err(LayerError::DuplicateLayer { preference_id });
        }
        self.by_preference_id
            .insert(preference_id, self.layers.len());
        self.layers.push(layer);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Layer>> {
        self.layers.iter()
    }

    pub fn layer(&self, preference_id: &str) -> Option<&Arc<dyn Layer>> {
        self.by_preference_id
            .get(preference_id)
            .map(|&index| &self.layers[index])
    }

    /// Initialize every layer, then re-apply stored visibility.
    pub fn initialize_all(&self) {
        for layer in &self.layers {
            tracing::debug!("initializing layer {}", layer.preference_id());
            layer.initialize();
        }
        self.apply_visibility();
    }

    /// Register every layer with `renderer`, then re-apply stored visibility.
    pub fn register_all_with_renderer(&self, renderer: &Arc<dyn RendererController>) {
        for layer in &self.layers {
            layer.register_with_renderer(renderer);
        }
        self.apply_visibility();
    }

    /// Show or hide one layer and remember the choice.
    pub fn set_layer_visible(&self, preference_id: &str, visible: bool) -> LayerResult<()> {
        let layer = self
            .layer(preference_id)
            .ok_or_else(|| LayerError::UnknownLayer {
                preference_id: preference_id.to_owned(),
            })?;
        self.visibility
            .lock()
            .insert(preference_id.to_owned(), visible);
        layer.set_visible(visible);
        Ok(())
    }

    /// The visibility last requested for a layer (layers default to visible).
    pub fn is_layer_visible(&self, preference_id: &str) -> LayerResult<bool> {
        if self.layer(preference_id).is_none() {
            return Err(LayerError::UnknownLayer {
                preference_id: preference_id.to_owned(),
            });
        }
        Ok(self.desired_visibility(preference_id))
    }

    /// Search every layer for an exact (case-insensitive) name.
    pub fn search_by_object_name(&self, name: &str) -> Vec<SearchResult> {
        self.layers
            .iter()
            .flat_map(|layer| layer.search_by_object_name(name))
            .collect()
    }

    pub fn object_names_matching_prefix(&self, prefix: &str) -> HashSet<String> {
        let mut names = HashSet::new();
        for layer in &self.layers {
            names.extend(layer.object_names_matching_prefix(prefix));
        }
        names
    }

    fn desired_visibility(&self, preference_id: &str) -> bool {
        self.visibility
            .lock()
            .get(preference_id)
            .copied()
            .unwrap_or(true)
    }

    fn apply_visibility(&self) {
        for layer in &self.layers {
            layer.set_visible(self.desired_visibility(&layer.preference_id()));
        }
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LayerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerManager")
            .field("layers", &self.by_preference_id.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
