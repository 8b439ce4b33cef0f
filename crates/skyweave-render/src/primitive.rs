//! Drawable primitives.
//!
//! The set of primitive kinds is closed: points, lines, text labels and
//! images. Every batch handed to a render manager is a [`PrimitiveBatch`],
//! tagged with its [`PrimitiveKind`], so dispatch is an exhaustive `match`.
//!
//! Positions are unit vectors on the celestial sphere.

use glam::Vec3;

use crate::{Color, UpdatePolicy};

/// Discriminant for the closed set of primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Point,
    Line,
    Text,
    Image,
}

impl PrimitiveKind {
    /// Every kind, in the order layers route batches within a transaction.
    pub const ALL: [PrimitiveKind; 4] = [
        PrimitiveKind::Text,
        PrimitiveKind::Point,
        PrimitiveKind::Line,
        PrimitiveKind::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Point => "point",
            PrimitiveKind::Line => "line",
            PrimitiveKind::Text => "text",
            PrimitiveKind::Image => "image",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared behavior of the concrete primitive types.
pub trait Primitive: Clone + Send + 'static {
    const KIND: PrimitiveKind;

    /// Copy the aspects selected by `policy` from `incoming` onto `self`.
    fn apply_update(&mut self, incoming: &Self, policy: UpdatePolicy);

    /// Wrap a list of this primitive type into a tagged batch.
    fn into_batch(objects: Vec<Self>) -> PrimitiveBatch;
}

/// A single star-like point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    pub position: Vec3,
    pub color: Color,
    /// Size in pixels.
    pub size: f32,
}

impl PointPrimitive {
    pub fn new(position: Vec3, color: Color, size: f32) -> Self {
        Self { position, color, size }
    }
}

impl Primitive for PointPrimitive {
    const KIND: PrimitiveKind = PrimitiveKind::Point;

    fn apply_update(&mut self, incoming: &Self, policy: UpdatePolicy) {
        if policy.updates_positions() {
            self.position = incoming.position;
        }
    }

    fn into_batch(objects: Vec<Self>) -> PrimitiveBatch {
        PrimitiveBatch::Points(objects)
    }
}

/// A polyline through two or more vertices (constellation lines, grids).
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub vertices: Vec<Vec3>,
    pub color: Color,
    pub width: f32,
}

impl LinePrimitive {
    pub fn new(vertices: Vec<Vec3>, color: Color, width: f32) -> Self {
        Self { vertices, color, width }
    }
}

impl Primitive for LinePrimitive {
    const KIND: PrimitiveKind = PrimitiveKind::Line;

    fn apply_update(&mut self, incoming: &Self, policy: UpdatePolicy) {
        if policy.updates_positions() {
            self.vertices.clone_from(&incoming.vertices);
        }
    }

    fn into_batch(objects: Vec<Self>) -> PrimitiveBatch {
        PrimitiveBatch::Lines(objects)
    }
}

/// A text label anchored at a sky position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub position: Vec3,
    pub label: String,
    pub color: Color,
    /// Angular offset from the anchor, so labels don't cover their object.
    pub offset: f32,
    pub font_size: u32,
}

impl TextPrimitive {
    pub fn new(position: Vec3, label: impl Into<String>, color: Color) -> Self {
        Self {
            position,
            label: label.into(),
            color,
            offset: 0.02,
            font_size: 15,
        }
    }
}

impl Primitive for TextPrimitive {
    const KIND: PrimitiveKind = PrimitiveKind::Text;

    fn apply_update(&mut self, incoming: &Self, policy: UpdatePolicy) {
        if policy.updates_positions() {
            self.position = incoming.position;
        }
    }

    fn into_batch(objects: Vec<Self>) -> PrimitiveBatch {
        PrimitiveBatch::Labels(objects)
    }
}

/// Identifier of an image resource. Resolution to pixels is the renderer's job.
pub type ImageId = u32;

/// A textured quad facing the viewer (planets, the moon, markers).
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePrimitive {
    pub position: Vec3,
    pub image_id: ImageId,
    /// Direction the top of the image points toward.
    pub up: Vec3,
    pub scale: f32,
}

impl ImagePrimitive {
    pub fn new(position: Vec3, image_id: ImageId, up: Vec3, scale: f32) -> Self {
        Self {
            position,
            image_id,
            up,
            scale,
        }
    }
}

impl Primitive for ImagePrimitive {
    const KIND: PrimitiveKind = PrimitiveKind::Image;

    fn apply_update(&mut self, incoming: &Self, policy: UpdatePolicy) {
        if policy.updates_positions() {
            self.position = incoming.position;
        }
        if policy.updates_images() {
            self.image_id = incoming.image_id;
            self.up = incoming.up;
        }
    }

    fn into_batch(objects: Vec<Self>) -> PrimitiveBatch {
        PrimitiveBatch::Images(objects)
    }
}

/// A list of primitives of one kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveBatch {
    Points(Vec<PointPrimitive>),
    Lines(Vec<LinePrimitive>),
    Labels(Vec<TextPrimitive>),
    Images(Vec<ImagePrimitive>),
}

impl PrimitiveBatch {
    /// An empty batch of the given kind.
    pub fn empty(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Point => PrimitiveBatch::Points(Vec::new()),
            PrimitiveKind::Line => PrimitiveBatch::Lines(Vec::new()),
            PrimitiveKind::Text => PrimitiveBatch::Labels(Vec::new()),
            PrimitiveKind::Image => PrimitiveBatch::Images(Vec::new()),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveBatch::Points(_) => PrimitiveKind::Point,
            PrimitiveBatch::Lines(_) => PrimitiveKind::Line,
            PrimitiveBatch::Labels(_) => PrimitiveKind::Text,
            PrimitiveBatch::Images(_) => PrimitiveKind::Image,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimitiveBatch::Points(v) => v.len(),
            PrimitiveBatch::Lines(v) => v.len(),
            PrimitiveBatch::Labels(v) => v.len(),
            PrimitiveBatch::Images(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `incoming` to this batch as a render manager would.
    ///
    /// `RESET` replaces the batch. An incremental policy patches objects
    /// pairwise by index; if the lengths differ there is no sensible pairing
    /// and the incoming batch replaces this one.
    pub fn apply(&mut self, incoming: PrimitiveBatch, policy: UpdatePolicy) {
        if policy.is_reset() || self.len() != incoming.len() {
            *self = incoming;
            return;
        }

        match (&mut *self, incoming) {
            (PrimitiveBatch::Points(current), PrimitiveBatch::Points(new)) => {
                patch_each(current, &new, policy)
            }
            (PrimitiveBatch::Lines(current), PrimitiveBatch::Lines(new)) => {
                patch_each(current, &new, policy)
            }
            (PrimitiveBatch::Labels(current), PrimitiveBatch::Labels(new)) => {
                patch_each(current, &new, policy)
            }
            (PrimitiveBatch::Images(current), PrimitiveBatch::Images(new)) => {
                patch_each(current, &new, policy)
            }
            (slot, incoming) => {
                tracing::warn!(
                    "batch kind changed from {} to {}; replacing",
                    slot.kind(),
                    incoming.kind()
                );
                *slot = incoming;
            }
        }
    }
}

fn patch_each<P: Primitive>(current: &mut [P], incoming: &[P], policy: UpdatePolicy) {
    for (existing, update) in current.iter_mut().zip(incoming) {
        existing.apply_update(update, policy);
    }
}

/// Primitives of every kind contributed by one layer in one redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveSet {
    pub points: Vec<PointPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub labels: Vec<TextPrimitive>,
    pub images: Vec<ImagePrimitive>,
}

impl PrimitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(mut self, points: Vec<PointPrimitive>) -> Self {
        self.points = points;
        self
    }

    pub fn with_lines(mut self, lines: Vec<LinePrimitive>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_labels(mut self, labels: Vec<TextPrimitive>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_images(mut self, images: Vec<ImagePrimitive>) -> Self {
        self.images = images;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.lines.is_empty()
            && self.labels.is_empty()
            && self.images.is_empty()
    }

    /// Number of primitives of the given kind.
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Point => self.points.len(),
            PrimitiveKind::Line => self.lines.len(),
            PrimitiveKind::Text => self.labels.len(),
            PrimitiveKind::Image => self.images.len(),
        }
    }

    /// Move the primitives of one kind out as a tagged batch.
    pub fn take(&mut self, kind: PrimitiveKind) -> PrimitiveBatch {
        match kind {
            PrimitiveKind::Point => PointPrimitive::into_batch(std::mem::take(&mut self.points)),
            PrimitiveKind::Line => LinePrimitive::into_batch(std::mem::take(&mut self.lines)),
            PrimitiveKind::Text => TextPrimitive::into_batch(std::mem::take(&mut self.labels)),
            PrimitiveKind::Image => ImagePrimitive::into_batch(std::mem::take(&mut self.images)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32) -> PointPrimitive {
        PointPrimitive::new(Vec3::new(x, 0.0, 0.0), Color::WHITE, 2.0)
    }

    #[test]
    fn take_empties_only_the_requested_kind() {
        let mut set = PrimitiveSet::new()
            .with_points(vec![point(1.0), point(2.0)])
            .with_labels(vec![TextPrimitive::new(Vec3::X, "Sirius", Color::WHITE)]);

        let batch = set.take(PrimitiveKind::Point);
        assert_eq!(batch.kind(), PrimitiveKind::Point);
        assert_eq!(batch.len(), 2);
        assert!(set.points.is_empty());
        assert_eq!(set.count(PrimitiveKind::Text), 1);
    }

    #[test]
    fn incremental_update_keeps_appearance() {
        let mut current = PrimitiveBatch::Points(vec![point(1.0)]);
        let mut moved = point(5.0);
        moved.color = Color::RED;
        current.apply(
            PrimitiveBatch::Points(vec![moved]),
            UpdatePolicy::UPDATE_POSITIONS,
        );

        let PrimitiveBatch::Points(points) = current else {
            panic!("kind changed");
        };
        assert_eq!(points[0].position.x, 5.0);
        assert_eq!(points[0].color, Color::WHITE);
    }

    #[test]
    fn image_update_without_position_flag_keeps_position() {
        let original = ImagePrimitive::new(Vec3::X, 1, Vec3::Y, 0.03);
        let replacement = ImagePrimitive::new(Vec3::Z, 2, Vec3::Z, 0.03);
        let mut current = PrimitiveBatch::Images(vec![original]);
        current.apply(
            PrimitiveBatch::Images(vec![replacement]),
            UpdatePolicy::UPDATE_IMAGES,
        );

        let PrimitiveBatch::Images(images) = current else {
            panic!("kind changed");
        };
        assert_eq!(images[0].image_id, 2);
        assert_eq!(images[0].up, Vec3::Z);
        assert_eq!(images[0].position, Vec3::X);
    }

    #[test]
    fn length_mismatch_falls_back_to_replace() {
        let mut current = PrimitiveBatch::Points(vec![point(1.0), point(2.0)]);
        current.apply(PrimitiveBatch::empty(PrimitiveKind::Point), UpdatePolicy::UPDATE_POSITIONS);
        assert!(current.is_empty());
    }
}
