//! Vector math for sky coordinates.
//!
//! Celestial positions are unit vectors on the celestial sphere and are
//! represented with [`glam`] types.
//!
//! ```
//! use skyweave_core::math::Vec3;
//!
//! let zenith = Vec3::Y;
//! let east = Vec3::X;
//! let between = ((zenith + 2.0 * east) / 3.0).normalize();
//! assert!((between.length() - 1.0).abs() < 1e-6);
//! ```

pub use glam::{Mat3, Quat, Vec2, Vec3, Vec4};
