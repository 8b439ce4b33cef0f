//! Skyweave layers.
//!
//! A layer groups related sky content (stars, constellation lines, planet
//! images, labels) and publishes it to a renderer running on another thread.
//! Every change a layer makes is one [`AtomicTransaction`] that spans all
//! primitive kinds, so the renderer never shows half an update.
//!
//! - [`LayerCore`] holds the per-kind render managers behind a single lock
//!   and builds transactions.
//! - [`Layer`] is the lifecycle every layer exposes.
//! - [`SourceLayer`] builds a layer out of [`Source`]s and can poll them once
//!   per renderer frame.
//! - [`LayerManager`] owns all layers and routes visibility and search.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use skyweave_layers::{Layer, LayerCore};
//! use skyweave_render::{
//!     Color, PointPrimitive, PrimitiveSet, RendererController, SceneRenderer,
//! };
//! use glam::Vec3;
//!
//! struct Beacon {
//!     core: LayerCore,
//! }
//!
//! impl Layer for Beacon {
//!     fn core(&self) -> &LayerCore {
//!         &self.core
//!     }
//!
//!     fn name_id(&self) -> u32 {
//!         7
//!     }
//!
//!     fn redraw(&self) {
//!         let point = PointPrimitive::new(Vec3::Y, Color::YELLOW, 3.0);
//!         self.core.redraw(PrimitiveSet::new().with_points(vec![point]));
//!     }
//!
//!     fn on_renderer_changed(&self) {
//!         self.redraw();
//!     }
//! }
//!
//! let renderer = Arc::new(SceneRenderer::new());
//! let layer = Beacon { core: LayerCore::new("beacon", 20) };
//! let controller: Arc<dyn RendererController> = renderer.clone();
//! layer.register_with_renderer(&controller);
//!
//! renderer.apply_pending();
//! assert_eq!(renderer.with_scene(|scene| scene.visible_objects()), 1);
//! assert_eq!(layer.preference_id(), "source_provider.7");
//! ```
//!
//! [`AtomicTransaction`]: skyweave_render::AtomicTransaction

mod error;
mod layer;
mod manager;
mod resources;
mod search;
mod source;
mod source_layer;

pub use error::{LayerError, LayerResult};
pub use layer::{Layer, LayerCore, PREFERENCE_ID_PREFIX, preference_id_for};
pub use manager::LayerManager;
pub use resources::StringLookup;
pub use search::SearchResult;
pub use source::{PrimitiveSource, Source};
pub use source_layer::{SourceLayer, SourceLayerConfig};
