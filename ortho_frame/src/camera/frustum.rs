/// ViewFrustum - projection matrix, corner points and culling planes.
///
/// A frustum is configured with either perspective or orthographic
/// parameters. Configuration stores the projection matrix and the eight
/// corners of the view volume in camera space (camera at the origin,
/// looking down -Z). `transform()` moves those corners into world space
/// with an [`OrthonormalFrame`] and derives six inward-facing planes, which
/// the containment tests use.
///
/// Transformed corners and planes belong to the most recent `transform()`
/// call; reconfiguring the frustum clears them.

use glam::{Mat4, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::frame::OrthonormalFrame;
use crate::geometry::Plane;

const SOURCE: &str = "ortho::ViewFrustum";

/// Result of a 3-way frustum/sphere classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Sphere is entirely outside the frustum
    Outside,
    /// Sphere is entirely inside the frustum
    Inside,
    /// Sphere straddles at least one plane
    Partial,
}

/// Frustum corner indices
pub const CORNER_NEAR_UPPER_LEFT: usize = 0;
pub const CORNER_NEAR_LOWER_LEFT: usize = 1;
pub const CORNER_NEAR_UPPER_RIGHT: usize = 2;
pub const CORNER_NEAR_LOWER_RIGHT: usize = 3;
pub const CORNER_FAR_UPPER_LEFT: usize = 4;
pub const CORNER_FAR_LOWER_LEFT: usize = 5;
pub const CORNER_FAR_UPPER_RIGHT: usize = 6;
pub const CORNER_FAR_LOWER_RIGHT: usize = 7;

/// Frustum plane indices
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_BOTTOM: usize = 4;
pub const PLANE_TOP: usize = 5;

/// Corner triples per plane, ordered so that `Plane::from_points` yields a
/// normal pointing into the volume. Indexed by the `PLANE_*` constants.
const PLANE_CORNERS: [[usize; 3]; 6] = [
    // Near
    [CORNER_NEAR_UPPER_LEFT, CORNER_NEAR_LOWER_RIGHT, CORNER_NEAR_LOWER_LEFT],
    // Far
    [CORNER_FAR_UPPER_LEFT, CORNER_FAR_LOWER_RIGHT, CORNER_FAR_UPPER_RIGHT],
    // Left
    [CORNER_NEAR_LOWER_LEFT, CORNER_FAR_UPPER_LEFT, CORNER_NEAR_UPPER_LEFT],
    // Right
    [CORNER_NEAR_LOWER_RIGHT, CORNER_FAR_UPPER_RIGHT, CORNER_FAR_LOWER_RIGHT],
    // Bottom
    [CORNER_NEAR_LOWER_LEFT, CORNER_FAR_LOWER_RIGHT, CORNER_FAR_LOWER_LEFT],
    // Top
    [CORNER_NEAR_UPPER_LEFT, CORNER_FAR_UPPER_RIGHT, CORNER_NEAR_UPPER_RIGHT],
];

/// How the frustum was last configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection (fov in radians)
    Perspective {
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Orthographic box; z bounds are distances along the view direction
    Orthographic {
        xmin: f32,
        xmax: f32,
        ymin: f32,
        ymax: f32,
        zmin: f32,
        zmax: f32,
    },
}

/// World-space state produced by `transform()`.
#[derive(Debug, Clone, Copy)]
struct Transformed {
    corners: [Vec4; 8],
    planes: [Plane; 6],
}

/// View frustum for a camera.
#[derive(Debug, Clone, Copy)]
pub struct ViewFrustum {
    projection: Projection,
    projection_matrix: Mat4,
    corners: [Vec4; 8],
    transformed: Option<Transformed>,
}

impl Default for ViewFrustum {
    /// Orthographic unit cube, (-1, 1) on every axis.
    fn default() -> Self {
        let mut frustum = Self {
            projection: Projection::Orthographic {
                xmin: -1.0,
                xmax: 1.0,
                ymin: -1.0,
                ymax: 1.0,
                zmin: -1.0,
                zmax: 1.0,
            },
            projection_matrix: Mat4::IDENTITY,
            corners: [Vec4::W; 8],
            transformed: None,
        };
        frustum.apply_orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        frustum
    }
}

impl ViewFrustum {
    /// Perspective frustum (fov in radians).
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        let mut frustum = Self::default();
        frustum.set_perspective(fov, aspect, near, far)?;
        Ok(frustum)
    }

    /// Orthographic frustum.
    pub fn orthographic(xmin: f32, xmax: f32, ymin: f32, ymax: f32, zmin: f32, zmax: f32) -> Result<Self> {
        let mut frustum = Self::default();
        frustum.set_orthographic(xmin, xmax, ymin, ymax, zmin, zmax)?;
        Ok(frustum)
    }

    // ===== CONFIGURATION =====

    /// Configure an orthographic box.
    ///
    /// The projection matrix follows OpenGL conventions. `zmin`/`zmax` are the
    /// near/far distances along the view direction, so the near corners sit at
    /// z = -zmin and the far corners at z = -zmax in camera space. Corners
    /// taken at z = +zmin/+zmax would disagree with `orthographic_rh_gl`
    /// and turn the derived planes outward; the negated depths keep both
    /// projections looking down -Z. The unit cube `(-1, 1)` on every axis
    /// is unaffected.
    pub fn set_orthographic(
        &mut self,
        xmin: f32,
        xmax: f32,
        ymin: f32,
        ymax: f32,
        zmin: f32,
        zmax: f32,
    ) -> Result<()> {
        let values = [xmin, xmax, ymin, ymax, zmin, zmax];
        if values.iter().any(|v| !v.is_finite()) {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "orthographic bounds must be finite, got {:?}",
                values
            )));
        }
        for (axis, min, max) in [("x", xmin, xmax), ("y", ymin, ymax), ("z", zmin, zmax)] {
            if min >= max {
                crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                    "orthographic {} range is empty ({} >= {})",
                    axis, min, max
                )));
            }
        }

        self.apply_orthographic(xmin, xmax, ymin, ymax, zmin, zmax);
        crate::ortho_debug!(
            SOURCE,
            "Orthographic frustum x [{}, {}] y [{}, {}] z [{}, {}]",
            xmin, xmax, ymin, ymax, zmin, zmax
        );
        Ok(())
    }

    fn apply_orthographic(&mut self, xmin: f32, xmax: f32, ymin: f32, ymax: f32, zmin: f32, zmax: f32) {
        self.projection = Projection::Orthographic { xmin, xmax, ymin, ymax, zmin, zmax };
        self.projection_matrix = Mat4::orthographic_rh_gl(xmin, xmax, ymin, ymax, zmin, zmax);

        let near_z = -zmin;
        let far_z = -zmax;
        self.corners = [
            Vec4::new(xmin, ymax, near_z, 1.0),
            Vec4::new(xmin, ymin, near_z, 1.0),
            Vec4::new(xmax, ymax, near_z, 1.0),
            Vec4::new(xmax, ymin, near_z, 1.0),
            Vec4::new(xmin, ymax, far_z, 1.0),
            Vec4::new(xmin, ymin, far_z, 1.0),
            Vec4::new(xmax, ymax, far_z, 1.0),
            Vec4::new(xmax, ymin, far_z, 1.0),
        ];
        self.transformed = None;
    }

    /// Configure a perspective frustum (fov in radians, vertical).
    ///
    /// Near corners lie at z = -near, far corners at z = -far, with
    /// half-heights `distance * tan(fov / 2)` and half-widths scaled by `aspect`.
    pub fn set_perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) -> Result<()> {
        if !(fov.is_finite() && aspect.is_finite() && near.is_finite() && far.is_finite()) {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "perspective parameters must be finite (fov {}, aspect {}, near {}, far {})",
                fov, aspect, near, far
            )));
        }
        if fov <= 0.0 || fov >= std::f32::consts::PI {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "field of view must be in (0, pi), got {}",
                fov
            )));
        }
        if aspect <= 0.0 {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "aspect ratio must be positive, got {}",
                aspect
            )));
        }
        if near <= 0.0 || near >= far {
            crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "clip planes must satisfy 0 < near < far, got near {} far {}",
                near, far
            )));
        }

        let tan_half = (fov * 0.5).tan();

        let ymax = near * tan_half;
        let ymin = -ymax;
        let xmin = ymin * aspect;
        let xmax = -xmin;

        let far_ymax = far * tan_half;
        let far_ymin = -far_ymax;
        let far_xmin = far_ymin * aspect;
        let far_xmax = -far_xmin;

        self.projection = Projection::Perspective { fov, aspect, near, far };
        self.projection_matrix = Mat4::perspective_rh_gl(fov, aspect, near, far);
        self.corners = [
            Vec4::new(xmin, ymax, -near, 1.0),
            Vec4::new(xmin, ymin, -near, 1.0),
            Vec4::new(xmax, ymax, -near, 1.0),
            Vec4::new(xmax, ymin, -near, 1.0),
            Vec4::new(far_xmin, far_ymax, -far, 1.0),
            Vec4::new(far_xmin, far_ymin, -far, 1.0),
            Vec4::new(far_xmax, far_ymax, -far, 1.0),
            Vec4::new(far_xmax, far_ymin, -far, 1.0),
        ];
        self.transformed = None;

        crate::ortho_debug!(
            SOURCE,
            "Perspective frustum fov {} aspect {} near {} far {}",
            fov, aspect, near, far
        );
        Ok(())
    }

    // ===== GETTERS =====

    /// Parameters of the current configuration.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Projection matrix (OpenGL clip space).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Untransformed corners in camera space, indexed by the `CORNER_*` constants.
    pub fn corners(&self) -> &[Vec4; 8] {
        &self.corners
    }

    /// World-space corners from the most recent `transform()`.
    pub fn transformed_corners(&self) -> Option<&[Vec4; 8]> {
        self.transformed.as_ref().map(|t| &t.corners)
    }

    /// Planes from the most recent `transform()`, indexed by the `PLANE_*` constants.
    pub fn planes(&self) -> Option<&[Plane; 6]> {
        self.transformed.as_ref().map(|t| &t.planes)
    }

    pub fn is_transformed(&self) -> bool {
        self.transformed.is_some()
    }

    // ===== TRANSFORM =====

    /// Place the frustum in the world using a camera frame.
    ///
    /// Builds a matrix with columns {cross(up, -forward), up, -forward,
    /// origin}. The forward vector is reversed because the untransformed
    /// corners look down -Z while a camera frame's forward is its viewing
    /// direction. All eight corners are transformed and the six planes are
    /// derived. Returns the matrix.
    ///
    /// On failure the frustum is left untransformed, so containment tests
    /// report `InvalidState` until the next successful call.
    pub fn transform(&mut self, camera: &OrthonormalFrame) -> Result<Mat4> {
        let forward = -camera.forward();
        let up = camera.up();
        let cross = up.cross(forward);

        let matrix = Mat4::from_cols(
            cross.extend(0.0),
            up.extend(0.0),
            forward.extend(0.0),
            camera.origin().extend(1.0),
        );

        self.transformed = None;

        let corners = self.corners.map(|corner| matrix * corner);

        let mut planes = [Plane::new(Vec3::ZERO, 0.0); 6];
        for (plane, [a, b, c]) in planes.iter_mut().zip(PLANE_CORNERS) {
            *plane = match Plane::from_points(
                corners[a].truncate(),
                corners[b].truncate(),
                corners[c].truncate(),
            ) {
                Ok(plane) => plane,
                Err(err) => {
                    crate::ortho_error!(SOURCE, "Cannot derive frustum planes: {}", err);
                    return Err(err);
                }
            };
        }

        self.transformed = Some(Transformed { corners, planes });
        Ok(matrix)
    }

    // ===== CONTAINMENT =====

    fn require_planes(&self) -> Result<&[Plane; 6]> {
        match self.planes() {
            Some(planes) => Ok(planes),
            None => {
                let err = Error::InvalidState(
                    "frustum has no planes; call transform() first".to_string(),
                );
                crate::ortho_error!(SOURCE, "{}", err);
                Err(err)
            }
        }
    }

    /// Test a sphere against all six planes.
    ///
    /// Returns false as soon as any plane's signed distance plus `radius` is
    /// not positive. A zero radius tests a single point.
    pub fn test_sphere(&self, center: Vec3, radius: f32) -> Result<bool> {
        let planes = self.require_planes()?;
        Ok(planes.iter().all(|plane| plane.distance(center) + radius > 0.0))
    }

    /// Test a single point.
    pub fn test_point(&self, point: Vec3) -> Result<bool> {
        self.test_sphere(point, 0.0)
    }

    /// Classify a sphere as outside, inside, or straddling the frustum.
    pub fn classify_sphere(&self, center: Vec3, radius: f32) -> Result<FrustumTest> {
        let planes = self.require_planes()?;
        let mut all_inside = true;

        for plane in planes {
            let distance = plane.distance(center);
            if distance + radius <= 0.0 {
                return Ok(FrustumTest::Outside);
            }
            if distance - radius < 0.0 {
                all_inside = false;
            }
        }

        Ok(if all_inside { FrustumTest::Inside } else { FrustumTest::Partial })
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
