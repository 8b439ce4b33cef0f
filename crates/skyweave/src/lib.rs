//! Skyweave - layered sky rendering
//!
//! Skyweave keeps the content of a sky view (stars, constellation lines,
//! planet images, labels) in independent layers and publishes every change to
//! a renderer running on another thread as one atomic transaction.
//!
//! - **Layers**: [`layers::LayerCore`] and the [`layers::Layer`] lifecycle
//! - **Sources**: [`layers::SourceLayer`] assembles a layer from data sources
//!   and polls them once per frame
//! - **Renderer boundary**: primitives, update policies and transactions in
//!   [`render`]
//! - **Core**: logging, profiling and configuration in [`core`]
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use skyweave::prelude::*;
//!
//! struct Horizon {
//!     core: LayerCore,
//! }
//!
//! impl Layer for Horizon {
//!     fn core(&self) -> &LayerCore {
//!         &self.core
//!     }
//!
//!     fn name_id(&self) -> u32 {
//!         2
//!     }
//!
//!     fn redraw(&self) {
//!         let line = LinePrimitive::new(vec![Vec3::X, Vec3::Z, -Vec3::X], Color::RED, 1.5);
//!         self.core.redraw(PrimitiveSet::new().with_lines(vec![line]));
//!     }
//!
//!     fn on_renderer_changed(&self) {
//!         self.redraw();
//!     }
//! }
//!
//! let mut layers = LayerManager::new();
//! layers
//!     .add(Arc::new(Horizon { core: LayerCore::new("horizon", 5) }))
//!     .unwrap();
//!
//! let renderer = Arc::new(SceneRenderer::new());
//! let controller: Arc<dyn RendererController> = renderer.clone();
//! layers.initialize_all();
//! layers.register_all_with_renderer(&controller);
//! layers.set_layer_visible("source_provider.2", false).unwrap();
//!
//! renderer.frame();
//! assert_eq!(renderer.with_scene(|scene| scene.visible_objects()), 0);
//! ```

// Re-export core types
pub use skyweave_core as core;
pub use skyweave_core::math;
pub use skyweave_core::{Config, ProfilingMode};

#[cfg(feature = "render")]
pub use skyweave_render as render;

#[cfg(feature = "layers")]
pub use skyweave_layers as layers;

/// Initialize logging and profiling from `SKYWEAVE_LOG` and the defaults.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init() -> Config {
    let config = Config::from_env();
    skyweave_core::logging::init_with(&config);
    tracing::debug!("skyweave initialized with {:?}", config);
    config
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use skyweave_core::math::{Vec2, Vec3, Vec4};
    pub use skyweave_core::{Config, ProfilingMode};

    // Renderer boundary
    #[cfg(feature = "render")]
    pub use skyweave_render::{
        AtomicTransaction, Color, ImagePrimitive, LinePrimitive, PointPrimitive, PrimitiveKind,
        PrimitiveSet, RenderManager, RendererController, SceneRenderer, TextPrimitive,
        UpdateClosure, UpdatePolicy,
    };

    // Layers
    #[cfg(feature = "layers")]
    pub use skyweave_layers::{
        Layer, LayerCore, LayerError, LayerManager, PrimitiveSource, SearchResult, Source,
        SourceLayer, SourceLayerConfig,
    };
}
