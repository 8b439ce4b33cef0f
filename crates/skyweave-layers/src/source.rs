//! Producers of primitives.

use glam::Vec3;
use skyweave_render::{
    ImagePrimitive, LinePrimitive, PointPrimitive, PrimitiveSet, TextPrimitive, UpdatePolicy,
};

/// Read access to the primitives a source currently holds.
pub trait PrimitiveSource {
    fn points(&self) -> &[PointPrimitive] {
        &[]
    }

    fn lines(&self) -> &[LinePrimitive] {
        &[]
    }

    fn labels(&self) -> &[TextPrimitive] {
        &[]
    }

    fn images(&self) -> &[ImagePrimitive] {
        &[]
    }

    /// Names the object can be searched by.
    fn names(&self) -> &[String] {
        &[]
    }

    /// Where search results for this source should point.
    fn search_location(&self) -> Option<Vec3> {
        None
    }

    /// Append copies of every primitive to `set`.
    fn append_to(&self, set: &mut PrimitiveSet) {
        set.points.extend_from_slice(self.points());
        set.lines.extend_from_slice(self.lines());
        set.labels.extend_from_slice(self.labels());
        set.images.extend_from_slice(self.images());
    }
}

/// A source of sky objects that may change over time.
///
/// Owned by a [`SourceLayer`](crate::SourceLayer), which calls
/// [`initialize`](Source::initialize) once and then [`update`](Source::update)
/// on every renderer frame while polling is enabled.
pub trait Source: PrimitiveSource + Send {
    /// Compute the first-draw state and return the source as its own
    /// primitive container.
    fn initialize(&mut self) -> &dyn PrimitiveSource;

    /// Recompute state if needed and report what changed since the last poll.
    /// An empty policy means no redraw is needed.
    fn update(&mut self) -> UpdatePolicy {
        UpdatePolicy::empty()
    }
}
