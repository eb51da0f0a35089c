//! Infinite plane primitive and half-space classification
//!
//! A plane is stored as a unit normal plus a signed distance, so the plane
//! equation for a point `p` is `dot(normal, p) + distance`. Every mutation
//! keeps the normal normalized.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::foundation::math::{constants, Mat4, Vec3, Vec4};
use crate::frustum::Frustum;
use crate::ray::Ray;
use crate::sphere::BoundingSphere;

/// Classification of a volume relative to a plane's half-spaces
///
/// The discriminant values (-1, 0, 1) are stable and exposed through
/// [`Side::as_i32`] for consumers that persist or script against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Entirely in the negative half-space (opposite the normal)
    Back = -1,
    /// Straddling or touching the plane
    Intersecting = 0,
    /// Entirely in the positive half-space (the normal's side)
    Front = 1,
}

impl Side {
    /// The stable integer classification value
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// An infinite plane dividing space into two half-spaces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::new(0.0, 1.0, 0.0),
            distance: 0.0,
        }
    }
}

impl Plane {
    /// Creates a plane from a normal and a signed distance
    ///
    /// The normal is normalized and the distance rescaled accordingly, so
    /// non-unit inputs describe the same geometric plane.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let mut plane = Self { normal, distance };
        plane.normalize();
        plane
    }

    /// The plane's unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The plane's signed distance term
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Replaces the normal, renormalizing the plane
    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
        self.normalize();
    }

    /// Replaces the distance term
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    /// Replaces both normal and distance, renormalizing the plane
    pub fn set(&mut self, normal: Vec3, distance: f32) {
        self.normal = normal;
        self.distance = distance;
        self.normalize();
    }

    /// Signed distance from a point to this plane
    ///
    /// Positive means the point is on the normal's side, negative the
    /// opposite side, zero on the plane.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }

    /// The unique point common to three planes, if one exists
    ///
    /// Returns `None` when the planes are parallel or otherwise degenerate
    /// (the determinant of the three normals is within epsilon of zero).
    pub fn intersection(p1: &Self, p2: &Self, p3: &Self) -> Option<Vec3> {
        // Cramer's rule on the normal matrix. The normals are unit length
        // by invariant, so the plane anchors contribute just -distance.
        let c1 = p2.normal.cross(&p3.normal);
        let c2 = p3.normal.cross(&p1.normal);
        let c3 = p1.normal.cross(&p2.normal);
        let det = p1.normal.dot(&c1);

        if det.abs() <= constants::EPSILON {
            return None;
        }

        let point = (c1 * -p1.distance + c2 * -p2.distance + c3 * -p3.distance) / det;
        Some(point)
    }

    /// True iff the two planes' normals are collinear
    ///
    /// The test is an exact zero cross product, so nearly-parallel planes
    /// are still reported as non-parallel.
    pub fn is_parallel(&self, plane: &Self) -> bool {
        self.normal.cross(&plane.normal) == Vec3::zeros()
    }

    /// Classifies another plane relative to this one
    ///
    /// Non-parallel (or identical-normal) planes intersect; parallel planes
    /// are classified by the half-space their anchor point falls in. Note
    /// that antiparallel normals count as parallel here.
    pub fn intersects_plane(&self, plane: &Self) -> Side {
        if self.normal == plane.normal || !self.is_parallel(plane) {
            return Side::Intersecting;
        }

        // The other plane's anchor point, directly along its normal.
        let point = plane.normal * -plane.distance;
        if self.distance_to(point) > 0.0 {
            Side::Front
        } else {
            Side::Back
        }
    }

    /// Classifies a ray relative to this plane
    pub fn intersects_ray(&self, ray: &Ray) -> Side {
        let d = self.distance_to(ray.origin());

        // An origin exactly on the plane intersects regardless of direction.
        if d == 0.0 {
            return Side::Intersecting;
        }

        if self.normal.dot(&ray.direction()) > 0.0 {
            if d < 0.0 {
                Side::Intersecting
            } else {
                Side::Front
            }
        } else if d > 0.0 {
            Side::Intersecting
        } else {
            Side::Back
        }
    }

    /// Classifies a frustum relative to this plane by its eight corners
    pub fn intersects_frustum(&self, frustum: &Frustum) -> Side {
        let corners = frustum.corners();

        // The sign of the first corner picks the candidate half-space; any
        // later corner on the other side of the plane means a straddle.
        let d = self.distance_to(corners[0]);
        if d > 0.0 {
            if corners[1..].iter().any(|c| self.distance_to(*c) <= 0.0) {
                Side::Intersecting
            } else {
                Side::Front
            }
        } else if d < 0.0 {
            if corners[1..].iter().any(|c| self.distance_to(*c) >= 0.0) {
                Side::Intersecting
            } else {
                Side::Back
            }
        } else {
            Side::Intersecting
        }
    }

    /// Classifies a sphere relative to this plane
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> Side {
        sphere.intersects_plane(self)
    }

    /// Classifies a bounding box relative to this plane
    pub fn intersects_box(&self, bounds: &BoundingBox) -> Side {
        bounds.intersects_plane(self)
    }

    /// Transforms this plane by a matrix
    ///
    /// The (normal, distance) 4-tuple is multiplied by the inverse
    /// transpose and renormalized. A non-invertible matrix leaves the
    /// plane unchanged.
    pub fn transform(&mut self, matrix: &Mat4) {
        if let Some(inverted) = matrix.try_inverse() {
            let tuple = inverted.transpose()
                * Vec4::new(self.normal.x, self.normal.y, self.normal.z, self.distance);
            let normal = Vec3::new(tuple.x, tuple.y, tuple.z);
            let length = normal.magnitude();
            if length > 0.0 {
                self.normal = normal / length;
                self.distance = tuple.w / length;
            }
        }
    }

    /// Returns this plane transformed by a matrix
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut plane = *self;
        plane.transform(matrix);
        plane
    }

    // Normalizes the normal, rescaling the distance so the plane is
    // geometrically unchanged. A zero normal is left untouched.
    fn normalize(&mut self) {
        if self.normal == Vec3::zeros() {
            return;
        }

        let factor = 1.0 / self.normal.magnitude();
        if factor != 1.0 {
            self.normal *= factor;
            self.distance *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_plane() {
        let plane = Plane::default();
        assert_eq!(plane.normal(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.distance(), 0.0);
    }

    #[test]
    fn test_new_normalizes_normal_and_distance() {
        // (0, 2, 0) with distance 4 is the same plane as (0, 1, 0) with 2.
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), 4.0);
        assert_relative_eq!(plane.normal(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(plane.distance(), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_signed_distance() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        assert_relative_eq!(plane.distance_to(Vec3::new(0.0, 5.0, 0.0)), 5.0);
        assert_relative_eq!(plane.distance_to(Vec3::new(3.0, -2.0, 7.0)), -2.0);
        assert_relative_eq!(plane.distance_to(Vec3::new(1.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn test_sign_matches_side_classification() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let above = BoundingSphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0);
        let below = BoundingSphere::new(Vec3::new(0.0, -10.0, 0.0), 1.0);

        assert!(plane.distance_to(above.center) > 0.0);
        assert_eq!(plane.intersects_sphere(&above), Side::Front);
        assert!(plane.distance_to(below.center) < 0.0);
        assert_eq!(plane.intersects_sphere(&below), Side::Back);
    }

    #[test]
    fn test_side_integer_values() {
        assert_eq!(Side::Back.as_i32(), -1);
        assert_eq!(Side::Intersecting.as_i32(), 0);
        assert_eq!(Side::Front.as_i32(), 1);
    }

    #[test]
    fn test_triple_intersection_coordinate_planes() {
        let yz = Plane::new(Vec3::new(1.0, 0.0, 0.0), 0.0);
        let xz = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let xy = Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0);

        let point = Plane::intersection(&yz, &xz, &xy).unwrap();
        assert_relative_eq!(point, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn test_triple_intersection_offset_planes() {
        let p1 = Plane::new(Vec3::new(1.0, 0.0, 0.0), -2.0);
        let p2 = Plane::new(Vec3::new(0.0, 1.0, 0.0), 3.0);
        let p3 = Plane::new(Vec3::new(0.0, 0.0, 1.0), -7.0);

        // x = 2, y = -3, z = 7 zero out the three plane equations.
        let point = Plane::intersection(&p1, &p2, &p3).unwrap();
        assert_relative_eq!(point, Vec3::new(2.0, -3.0, 7.0), epsilon = EPSILON);
    }

    #[test]
    fn test_triple_intersection_degenerate() {
        let p1 = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let p2 = Plane::new(Vec3::new(0.0, 1.0, 0.0), 5.0);
        let p3 = Plane::new(Vec3::new(1.0, 0.0, 0.0), 0.0);

        assert_eq!(Plane::intersection(&p1, &p2, &p3), None);
    }

    #[test]
    fn test_parallel_planes_classified_by_anchor() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let above = Plane::new(Vec3::new(0.0, 1.0, 0.0), -5.0); // y = 5
        let below = Plane::new(Vec3::new(0.0, 1.0, 0.0), 5.0); // y = -5

        // Identical normals always report intersecting.
        assert_eq!(plane.intersects_plane(&above), Side::Intersecting);
        assert_eq!(above.intersects_plane(&below), Side::Intersecting);

        // Antiparallel normals are parallel per is_parallel, so the anchor
        // point decides the half-space.
        let flipped_above = Plane::new(Vec3::new(0.0, -1.0, 0.0), 5.0); // y = 5
        assert!(plane.is_parallel(&flipped_above));
        assert_eq!(plane.intersects_plane(&flipped_above), Side::Front);
        assert_eq!(flipped_above.intersects_plane(&below), Side::Back);
    }

    #[test]
    fn test_non_parallel_planes_intersect() {
        let p1 = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let p2 = Plane::new(Vec3::new(1.0, 0.0, 0.0), 12.0);
        assert!(!p1.is_parallel(&p2));
        assert_eq!(p1.intersects_plane(&p2), Side::Intersecting);
    }

    #[test]
    fn test_ray_classification() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);

        // Origin on the plane intersects no matter the direction.
        let on_plane = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.intersects_ray(&on_plane), Side::Intersecting);

        // Above the plane, pointing further away: front, not intersecting.
        let leaving = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.intersects_ray(&leaving), Side::Front);

        // Above the plane, pointing down through it.
        let entering = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(plane.intersects_ray(&entering), Side::Intersecting);

        // Below the plane, pointing further down.
        let receding = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(plane.intersects_ray(&receding), Side::Back);
    }

    #[test]
    fn test_transform_by_translation() {
        let mut plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
        plane.transform(&Mat4::new_translation(&Vec3::new(0.0, 3.0, 0.0)));

        // The plane y = 0 moved to y = 3.
        assert_relative_eq!(plane.normal(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(plane.distance_to(Vec3::new(0.0, 3.0, 0.0)), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_by_rotation() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0)
            .transformed(&Mat4::rotation_z(crate::foundation::math::constants::HALF_PI));

        // Rotating y = 0 a quarter turn around z points the normal at -x.
        assert_relative_eq!(plane.normal(), Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_singular_matrix_is_noop() {
        let mut plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), 4.0);
        let before = plane;
        plane.transform(&Mat4::zeros());
        assert_eq!(plane, before);
    }
}
