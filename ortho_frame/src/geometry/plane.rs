/// Plane - unit normal and signed offset.
///
/// Points `x` on the plane satisfy `dot(normal, x) == offset`. The signed
/// distance of a point is positive on the side the normal points to.

use glam::{Vec3, Vec4};
use crate::error::{Error, Result};

const SOURCE: &str = "ortho::Plane";

/// Squared sine of the angle between the two edges below which three points
/// are treated as collinear. Relative to the edge lengths, so it holds at
/// any scale.
const COLLINEAR_EPSILON: f32 = 1e-10;

/// Plane in normal/offset form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// `dot(normal, p)` for any point `p` on the plane
    pub offset: f32,
}

/// Intersection of a segment with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Parameter along the segment, in [0, 1]
    pub t: f32,
    /// Intersection point, `a + t * (b - a)`
    pub point: Vec3,
}

impl Plane {
    /// Plane from a normal and offset. The normal is stored as given.
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Plane through `point` with the given normal (normalized here).
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Result<Self> {
        let unit = match normal.try_normalize() {
            Some(unit) => unit,
            None => crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "plane normal {} cannot be normalized",
                normal
            ))),
        };
        Ok(Self { normal: unit, offset: unit.dot(point) })
    }

    /// Plane through three points in counter-clockwise order.
    ///
    /// normal = normalize(cross(b - a, c - a)), offset = dot(normal, a).
    /// Collinear or coincident points are rejected.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Result<Self> {
        let ab = b - a;
        let ac = c - a;
        let cross = ab.cross(ac);
        let spread = ab.length_squared() * ac.length_squared();
        let normal = if cross.length_squared() <= COLLINEAR_EPSILON * spread {
            None
        } else {
            cross.try_normalize()
        };
        match normal {
            Some(normal) => Ok(Self { normal, offset: normal.dot(a) }),
            None => crate::ortho_bail!(SOURCE, Error::DegenerateInput(format!(
                "points {}, {}, {} do not span a plane",
                a, b, c
            ))),
        }
    }

    /// Signed distance from `point` to the plane.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    /// (A, B, C, D) form, `Ax + By + Cz + D = 0`.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(-self.offset)
    }

    /// Intersect the segment `a -> b` with the plane.
    ///
    /// Returns the hit when the intersection parameter lies in [0, 1].
    /// A segment parallel to the plane (including one lying in it) has no
    /// single intersection and returns `None`.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> Option<SegmentHit> {
        let ab = b - a;
        let denom = self.normal.dot(ab);
        if denom == 0.0 {
            return None;
        }

        let t = (self.offset - self.normal.dot(a)) / denom;
        if (0.0..=1.0).contains(&t) {
            Some(SegmentHit { t, point: a + t * ab })
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
