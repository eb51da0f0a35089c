//! View frustum derived from a view-projection matrix
//!
//! The frustum is a bundle of six planes with their normals pointing
//! inward, recomputed whenever the source matrix changes. It carries no
//! intersection algorithm of its own; every query delegates to the
//! canonical test on the other type.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::foundation::math::{Mat4, Vec3};
use crate::plane::{Plane, Side};
use crate::ray::Ray;
use crate::sphere::BoundingSphere;

/// A camera frustum: six inward-facing planes plus the matrix they were
/// extracted from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    near: Plane,
    far: Plane,
    left: Plane,
    right: Plane,
    bottom: Plane,
    top: Plane,
    matrix: Mat4,
}

impl Default for Frustum {
    /// The frustum of the identity matrix: the [-1, 1]^3 clip volume
    fn default() -> Self {
        Self::new(Mat4::identity())
    }
}

impl Frustum {
    /// Creates a frustum from a combined view-projection matrix
    pub fn new(matrix: Mat4) -> Self {
        let mut frustum = Self {
            near: Plane::default(),
            far: Plane::default(),
            left: Plane::default(),
            right: Plane::default(),
            bottom: Plane::default(),
            top: Plane::default(),
            matrix,
        };
        frustum.update_planes();
        frustum
    }

    /// The source view-projection matrix
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Replaces the source matrix, rederiving all six planes
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.update_planes();
    }

    /// The near plane
    pub fn near(&self) -> Plane {
        self.near
    }

    /// The far plane
    pub fn far(&self) -> Plane {
        self.far
    }

    /// The left plane
    pub fn left(&self) -> Plane {
        self.left
    }

    /// The right plane
    pub fn right(&self) -> Plane {
        self.right
    }

    /// The bottom plane
    pub fn bottom(&self) -> Plane {
        self.bottom
    }

    /// The top plane
    pub fn top(&self) -> Plane {
        self.top
    }

    /// All six planes in near, far, left, right, bottom, top order
    pub fn planes(&self) -> [Plane; 6] {
        [
            self.near, self.far, self.left, self.right, self.bottom, self.top,
        ]
    }

    /// The eight corners of the frustum
    ///
    /// Order (N near, F far, L left, R right, B bottom, T top):
    /// LTN, LBN, RBN, RTN, RTF, RBF, LBF, LTF — the same winding as
    /// [`BoundingBox::corners`].
    pub fn corners(&self) -> [Vec3; 8] {
        [
            corner(&self.near, &self.left, &self.top),
            corner(&self.near, &self.left, &self.bottom),
            corner(&self.near, &self.right, &self.bottom),
            corner(&self.near, &self.right, &self.top),
            corner(&self.far, &self.right, &self.top),
            corner(&self.far, &self.right, &self.bottom),
            corner(&self.far, &self.left, &self.bottom),
            corner(&self.far, &self.left, &self.top),
        ]
    }

    /// The four near-plane corners: left-top, left-bottom, right-bottom,
    /// right-top
    pub fn near_corners(&self) -> [Vec3; 4] {
        [
            corner(&self.near, &self.left, &self.top),
            corner(&self.near, &self.left, &self.bottom),
            corner(&self.near, &self.right, &self.bottom),
            corner(&self.near, &self.right, &self.top),
        ]
    }

    /// The four far-plane corners: right-top, right-bottom, left-bottom,
    /// left-top
    pub fn far_corners(&self) -> [Vec3; 4] {
        [
            corner(&self.far, &self.right, &self.top),
            corner(&self.far, &self.right, &self.bottom),
            corner(&self.far, &self.left, &self.bottom),
            corner(&self.far, &self.left, &self.top),
        ]
    }

    /// True iff the sphere is at least partially inside the frustum
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        sphere.intersects_frustum(self)
    }

    /// True iff the box is at least partially inside the frustum
    pub fn intersects_box(&self, bounds: &BoundingBox) -> bool {
        bounds.intersects_frustum(self)
    }

    /// Classifies a plane against the frustum's corners
    pub fn intersects_plane(&self, plane: &Plane) -> Side {
        plane.intersects_frustum(self)
    }

    /// Entry distance of a ray into the frustum, or `None` on a miss
    pub fn intersects_ray(&self, ray: &Ray) -> Option<f32> {
        ray.intersects_frustum(self)
    }

    /// True iff the point is inside the frustum (on-boundary counts)
    pub fn contains_point(&self, point: Vec3) -> bool {
        // Inside means a non-negative signed distance to every plane,
        // the same six-half-space convention the sphere and box tests use.
        self.planes()
            .iter()
            .all(|plane| plane.distance_to(point) >= 0.0)
    }

    // Gribb-Hartmann extraction: each clip plane is a sum or difference
    // of the matrix's fourth row with one other row, renormalized since
    // the raw row combinations are not unit length.
    fn update_planes(&mut self) {
        let m = &self.matrix;
        self.near = Plane::new(
            Vec3::new(m.m41 + m.m31, m.m42 + m.m32, m.m43 + m.m33),
            m.m44 + m.m34,
        );
        self.far = Plane::new(
            Vec3::new(m.m41 - m.m31, m.m42 - m.m32, m.m43 - m.m33),
            m.m44 - m.m34,
        );
        self.left = Plane::new(
            Vec3::new(m.m41 + m.m11, m.m42 + m.m12, m.m43 + m.m13),
            m.m44 + m.m14,
        );
        self.right = Plane::new(
            Vec3::new(m.m41 - m.m11, m.m42 - m.m12, m.m43 - m.m13),
            m.m44 - m.m14,
        );
        self.bottom = Plane::new(
            Vec3::new(m.m41 + m.m21, m.m42 + m.m22, m.m43 + m.m23),
            m.m44 + m.m24,
        );
        self.top = Plane::new(
            Vec3::new(m.m41 - m.m21, m.m42 - m.m22, m.m43 - m.m23),
            m.m44 - m.m24,
        );
    }
}

// A corner is the meeting point of three planes. A well-formed
// view-projection matrix always yields unique triple intersections; if a
// degenerate matrix sneaks in we warn and fall back to the origin rather
// than poison the corner array with stale data.
fn corner(p1: &Plane, p2: &Plane, p3: &Plane) -> Vec3 {
    Plane::intersection(p1, p2, p3).unwrap_or_else(|| {
        log::warn!("degenerate plane triple while deriving frustum corners");
        Vec3::zeros()
    })
}
