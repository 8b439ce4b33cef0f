//! Skyweave render boundary.
//!
//! Everything a layer needs to talk to a renderer that runs on its own thread:
//!
//! - [`PrimitiveKind`] and the primitive types, batched as [`PrimitiveBatch`]
//! - [`UpdatePolicy`] flags selecting replace vs. in-place updates
//! - [`RenderManager`] handles, one per primitive kind per layer
//! - [`AtomicTransaction`], the unit the renderer applies indivisibly
//! - the [`RendererController`] trait and [`UpdateClosure`] callbacks
//! - [`SceneRenderer`], an in-process implementation of the boundary

mod color;
mod controller;
mod manager;
mod primitive;
pub mod scene;
mod transaction;
mod update;

pub use color::Color;
pub use controller::{RendererController, UpdateClosure};
pub use manager::{ManagerId, RenderManager};
pub use primitive::{
    ImageId, ImagePrimitive, LinePrimitive, PointPrimitive, Primitive, PrimitiveBatch,
    PrimitiveKind, PrimitiveSet, TextPrimitive,
};
pub use scene::{Scene, SceneRenderer};
pub use transaction::{AtomicTransaction, ManagerOp, TransactionId};
pub use update::UpdatePolicy;
