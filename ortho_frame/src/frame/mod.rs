//! Frame module - orthonormal camera/object frames.

mod orthonormal_frame;

pub use orthonormal_frame::{OrthonormalFrame, RenormalizePolicy, ORTHONORMAL_EPSILON};
