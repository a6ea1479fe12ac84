//! Geometry module - planes and intersection helpers.

mod plane;

pub use plane::{Plane, SegmentHit};
