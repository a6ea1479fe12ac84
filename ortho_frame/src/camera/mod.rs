//! Camera module - view frustum configuration, transform and culling.
//!
//! A frustum is a value owned by its caller, driven each frame with the
//! camera's [`OrthonormalFrame`](crate::frame::OrthonormalFrame).

mod frustum;

pub use frustum::{
    ViewFrustum, FrustumTest, Projection,
    PLANE_NEAR, PLANE_FAR, PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP,
    CORNER_NEAR_UPPER_LEFT, CORNER_NEAR_LOWER_LEFT, CORNER_NEAR_UPPER_RIGHT, CORNER_NEAR_LOWER_RIGHT,
    CORNER_FAR_UPPER_LEFT, CORNER_FAR_LOWER_LEFT, CORNER_FAR_UPPER_RIGHT, CORNER_FAR_LOWER_RIGHT,
};
