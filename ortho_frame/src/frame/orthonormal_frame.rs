/// OrthonormalFrame - position and orientation of a camera or object.
///
/// A frame stores an origin and two basis vectors (forward, up). The third
/// axis is derived on demand as `cross(up, forward)`. Mutators do not
/// renormalize unless the frame's [`RenormalizePolicy`] asks for it, so a
/// long-lived, frequently rotated frame should call [`OrthonormalFrame::normalize`]
/// from time to time.
///
/// Matrices are column-major (`glam` convention). The model matrix maps
/// local coordinates to world coordinates; the camera matrix maps world
/// coordinates into the camera's local space (looking down -Z).

use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::error::{Error, Result};

const SOURCE: &str = "ortho::OrthonormalFrame";

/// Tolerance used by [`OrthonormalFrame::validate`].
pub const ORTHONORMAL_EPSILON: f32 = 1e-4;

/// When a frame restores orthonormality on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenormalizePolicy {
    /// Only when the caller invokes `normalize()`. Repeated rotations
    /// accumulate floating-point drift.
    #[default]
    Manual,
    /// After every `rotate_*` call.
    AfterRotation,
}

/// Orthonormal frame: origin + forward + up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthonormalFrame {
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    policy: RenormalizePolicy,
}

impl Default for OrthonormalFrame {
    fn default() -> Self {
        Self::new(false, Vec3::ZERO)
    }
}

impl OrthonormalFrame {
    /// Axis-aligned frame at `origin` with up = +Y.
    ///
    /// Forward is +Z for object frames and -Z for camera frames
    /// (right-handed coordinate system, cameras look down -Z).
    pub fn new(camera: bool, origin: Vec3) -> Self {
        let forward = if camera { Vec3::NEG_Z } else { Vec3::Z };
        Self {
            origin,
            forward,
            up: Vec3::Y,
            policy: RenormalizePolicy::Manual,
        }
    }

    /// Camera frame at the world origin.
    pub fn camera() -> Self {
        Self::new(true, Vec3::ZERO)
    }

    /// Builder-style policy override.
    pub fn with_policy(mut self, policy: RenormalizePolicy) -> Self {
        self.policy = policy;
        self
    }

    // ===== ACCESSORS =====

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: impl Into<Vec3>) {
        self.origin = origin.into();
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn set_forward(&mut self, direction: impl Into<Vec3>) {
        self.forward = direction.into();
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn set_up(&mut self, direction: impl Into<Vec3>) {
        self.up = direction.into();
    }

    pub fn policy(&self) -> RenormalizePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RenormalizePolicy) {
        self.policy = policy;
    }

    // ===== AXES =====

    /// Right axis, `cross(up, forward)`. Only orthogonal to the other two
    /// if they currently are.
    pub fn x_axis(&self) -> Vec3 {
        self.up.cross(self.forward)
    }

    /// Same as [`up`](Self::up).
    pub fn y_axis(&self) -> Vec3 {
        self.up
    }

    /// Same as [`forward`](Self::forward).
    pub fn z_axis(&self) -> Vec3 {
        self.forward
    }

    // ===== TRANSLATION =====

    /// Move the origin by a world-space delta.
    pub fn translate_world(&mut self, delta: impl Into<Vec3>) {
        self.origin += delta.into();
    }

    /// Move the origin along the frame's own axes (x = right, y = up, z = forward).
    pub fn translate_local(&mut self, delta: impl Into<Vec3>) {
        let delta = delta.into();
        self.move_forward(delta.z);
        self.move_up(delta.y);
        self.move_right(delta.x);
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.origin += self.forward * distance;
    }

    pub fn move_up(&mut self, distance: f32) {
        self.origin += self.up * distance;
    }

    pub fn move_right(&mut self, distance: f32) {
        self.origin += self.up.cross(self.forward) * distance;
    }

    // ===== MATRICES =====

    /// Model matrix with columns {x axis, up, forward, origin}.
    ///
    /// With `rotation_only` the translation column is (0, 0, 0, 1).
    /// The basis is used as-is; a non-orthonormal frame gives a skewed matrix.
    pub fn matrix(&self, rotation_only: bool) -> Mat4 {
        let translation = if rotation_only {
            Vec4::W
        } else {
            self.origin.extend(1.0)
        };
        Mat4::from_cols(
            self.x_axis().extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            translation,
        )
    }

    /// View matrix taking world coordinates into camera space.
    ///
    /// The rotation part is the transposed basis {cross(up, -forward), up,
    /// -forward}; the camera looks down its local -Z. Unless `rotation_only`,
    /// the result is `rotation * translation(-origin)`.
    pub fn camera_matrix(&self, rotation_only: bool) -> Mat4 {
        let z = -self.forward;
        let x = self.up.cross(z);

        let rotation = Mat4::from_cols(
            Vec4::new(x.x, self.up.x, z.x, 0.0),
            Vec4::new(x.y, self.up.y, z.y, 0.0),
            Vec4::new(x.z, self.up.z, z.z, 0.0),
            Vec4::W,
        );

        if rotation_only {
            return rotation;
        }

        rotation * Mat4::from_translation(-self.origin)
    }

    // ===== ROTATION =====

    /// Rotate up and forward around the local X axis.
    pub fn rotate_local_x(&mut self, angle: f32) {
        let rotation = axis_rotation(self.x_axis(), angle);
        self.up = rotation * self.up;
        self.forward = rotation * self.forward;
        self.after_rotation();
    }

    /// Rotate forward around the local Y (up) axis.
    pub fn rotate_local_y(&mut self, angle: f32) {
        let rotation = axis_rotation(self.up, angle);
        self.forward = rotation * self.forward;
        self.after_rotation();
    }

    /// Rotate up around the local Z (forward) axis.
    pub fn rotate_local_z(&mut self, angle: f32) {
        let rotation = axis_rotation(self.forward, angle);
        self.up = rotation * self.up;
        self.after_rotation();
    }

    /// Rotate around a world-space axis. The origin does not move.
    pub fn rotate_world(&mut self, angle: f32, axis: impl Into<Vec3>) {
        let rotation = axis_rotation(axis.into(), angle);
        self.up = rotation * self.up;
        self.forward = rotation * self.forward;
        self.after_rotation();
    }

    /// Rotate around an axis expressed in this frame's local space.
    pub fn rotate_local(&mut self, angle: f32, axis: impl Into<Vec3>) {
        let world_axis = self.local_to_world(axis.into(), true);
        self.rotate_world(angle, world_axis);
    }

    /// Restore orthonormality: forward is re-derived from up, then both are
    /// unit-normalized. Up keeps its direction.
    pub fn normalize(&mut self) {
        let cross = self.up.cross(self.forward);
        self.forward = cross.cross(self.up);

        self.up = self.up.normalize();
        self.forward = self.forward.normalize();
    }

    fn after_rotation(&mut self) {
        if self.policy == RenormalizePolicy::AfterRotation {
            self.normalize();
        }
    }

    // ===== COORDINATE CONVERSION =====

    /// Local point to world space. With `rotation_only` the origin is not added,
    /// which makes this usable for directions.
    pub fn local_to_world(&self, local: Vec3, rotation_only: bool) -> Vec3 {
        let world = self.matrix(true).transform_vector3(local);
        if rotation_only {
            world
        } else {
            world + self.origin
        }
    }

    /// World point to local space, through the inverse of the rotation matrix.
    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        let relative = world - self.origin;
        let inverse = self.matrix(true).inverse();
        Mat3::from_mat4(inverse) * relative
    }

    /// Transform a point by the full frame matrix (rotation + translation).
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix(false).transform_point3(point)
    }

    /// Rotate a vector by the frame's rotation.
    pub fn rotate_vector(&self, vector: Vec3) -> Vec3 {
        self.matrix(true).transform_vector3(vector)
    }

    // ===== VALIDATION =====

    /// True when forward and up are finite, unit length and orthogonal
    /// within `epsilon`.
    pub fn is_orthonormal(&self, epsilon: f32) -> bool {
        self.forward.is_finite()
            && self.up.is_finite()
            && (self.forward.length() - 1.0).abs() <= epsilon
            && (self.up.length() - 1.0).abs() <= epsilon
            && self.forward.dot(self.up).abs() <= epsilon
    }

    /// Check the basis and report what is wrong with it.
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() || !self.forward.is_finite() || !self.up.is_finite() {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "frame has non-finite components (origin {}, forward {}, up {})",
                self.origin, self.forward, self.up
            )));
        }
        if self.forward.length_squared() == 0.0 || self.up.length_squared() == 0.0 {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(
                "frame basis contains a zero-length vector".to_string(),
            ));
        }
        if !self.is_orthonormal(ORTHONORMAL_EPSILON) {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "frame basis is not orthonormal (|forward| = {}, |up| = {}, forward . up = {})",
                self.forward.length(),
                self.up.length(),
                self.forward.dot(self.up)
            )));
        }
        Ok(())
    }
}

/// Rotation of `angle` radians around `axis`. The axis is normalized first;
/// a zero axis yields NaN, like the rest of the unchecked API.
fn axis_rotation(axis: Vec3, angle: f32) -> Mat3 {
    Mat3::from_axis_angle(axis.normalize(), angle)
}

#[cfg(test)]
#[path = "orthonormal_frame_tests.rs"]
mod tests;
