//! Update policies for primitive batches.

use bitflags::bitflags;

bitflags! {
    /// How a render manager applies an incoming batch of primitives.
    ///
    /// [`UpdatePolicy::RESET`] replaces the manager's whole object set. The
    /// other flags patch existing objects in place, which keeps large point and
    /// line sets from being rebuilt when only one aspect changed.
    ///
    /// An empty policy returned from a source poll means nothing changed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UpdatePolicy: u8 {
        /// Discard current objects and use the incoming batch.
        const RESET            = 0b0000_0001;

        /// Positions (and line vertices) moved.
        const UPDATE_POSITIONS = 0b0000_0010;

        /// Image ids or image orientation changed.
        const UPDATE_IMAGES    = 0b0000_0100;
    }
}

impl UpdatePolicy {
    /// Returns true if the batch replaces the current object set.
    #[inline]
    pub fn is_reset(&self) -> bool {
        self.contains(Self::RESET)
    }

    /// Returns true if positions should be copied onto existing objects.
    #[inline]
    pub fn updates_positions(&self) -> bool {
        self.contains(Self::UPDATE_POSITIONS)
    }

    /// Returns true if image data should be copied onto existing objects.
    #[inline]
    pub fn updates_images(&self) -> bool {
        self.contains(Self::UPDATE_IMAGES)
    }

    /// Returns true if this is an in-place patch rather than a replacement.
    #[inline]
    pub fn is_incremental(&self) -> bool {
        !self.is_empty() && !self.is_reset()
    }
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self::RESET
    }
}
