//! Axis-aligned bounding box primitive
//!
//! `min`/`max` corners with the usual `min <= max` convention, assumed but
//! not enforced. The empty box is the degenerate point `min == max`; a box
//! collapsed to any single point counts as empty, not just the origin.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{self, Mat4, Vec3};
use crate::frustum::Frustum;
use crate::plane::{Plane, Side};
use crate::ray::Ray;
use crate::sphere::BoundingSphere;

/// An axis-aligned box used as a bounding volume
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The minimum corner
    pub min: Vec3,
    /// The maximum corner
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a box from its minimum and maximum corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The empty box: both corners at the origin
    pub fn empty() -> Self {
        Self::default()
    }

    /// True iff the box is a degenerate point (`min == max` on all axes)
    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }

    /// Replaces both corners
    pub fn set(&mut self, min: Vec3, max: Vec3) {
        self.min = min;
        self.max = max;
    }

    /// Sets this box to tightly contain the given sphere
    pub fn set_sphere(&mut self, sphere: &BoundingSphere) {
        let extent = Vec3::repeat(sphere.radius);
        self.min = sphere.center - extent;
        self.max = sphere.center + extent;
    }

    /// The center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corners of the box in a fixed order
    ///
    /// Corners 0-3 are the near face (z = max) counter-clockwise as seen
    /// from the positive z-axis, starting upper-left: left-top,
    /// left-bottom, right-bottom, right-top. Corners 4-7 are the far face
    /// (z = min) counter-clockwise as seen from the negative z-axis:
    /// right-top, right-bottom, left-bottom, left-top. Consumers rely on
    /// this exact ordering.
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
        ]
    }

    /// True iff the two boxes overlap or touch
    pub fn intersects_box(&self, bounds: &Self) -> bool {
        // Either box's min falling inside the other's range, per axis.
        ((self.min.x >= bounds.min.x && self.min.x <= bounds.max.x)
            || (bounds.min.x >= self.min.x && bounds.min.x <= self.max.x))
            && ((self.min.y >= bounds.min.y && self.min.y <= bounds.max.y)
                || (bounds.min.y >= self.min.y && bounds.min.y <= self.max.y))
            && ((self.min.z >= bounds.min.z && self.min.z <= bounds.max.z)
                || (bounds.min.z >= self.min.z && bounds.min.z <= self.max.z))
    }

    /// True iff the box overlaps or touches the sphere
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        sphere.intersects_box(self)
    }

    /// True iff the box is at least partially inside the frustum
    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        // Inside means on the front side of, or touching, all six planes.
        frustum
            .planes()
            .iter()
            .all(|plane| self.intersects_plane(plane) != Side::Back)
    }

    /// Classifies the box relative to a plane (touching counts as
    /// intersecting)
    pub fn intersects_plane(&self, plane: &Plane) -> Side {
        let distance = plane.distance_to(self.center());

        // Separating-axis test: project the half-extents onto the normal.
        let extents = (self.max - self.min) * 0.5;
        let normal = plane.normal();
        let projected = (extents.x * normal.x).abs()
            + (extents.y * normal.y).abs()
            + (extents.z * normal.z).abs();

        if distance.abs() <= projected {
            Side::Intersecting
        } else if distance > 0.0 {
            Side::Front
        } else {
            Side::Back
        }
    }

    /// Distance along a ray to the box, or `None` if the ray misses it
    ///
    /// Classic slab method: each axis narrows the valid parametric window
    /// `[dnear, dfar]`; an empty window, or one entirely behind the
    /// origin, is a miss. An origin inside the box reports a hit at
    /// distance 0, matching the sphere and frustum queries.
    pub fn intersects_ray(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut dnear = 0.0_f32;
        let mut dfar = 0.0_f32;

        for axis in 0..3 {
            // The sign of the reciprocal decides which corner is the slab
            // entry; this also handles infinite reciprocals for
            // axis-aligned directions.
            let div = 1.0 / direction[axis];
            let (tmin, tmax) = if div >= 0.0 {
                (
                    (self.min[axis] - origin[axis]) * div,
                    (self.max[axis] - origin[axis]) * div,
                )
            } else {
                (
                    (self.max[axis] - origin[axis]) * div,
                    (self.min[axis] - origin[axis]) * div,
                )
            };

            if axis == 0 {
                dnear = tmin;
                dfar = tmax;
            } else {
                dnear = dnear.max(tmin);
                dfar = dfar.min(tmax);
            }

            if dnear > dfar || dfar < 0.0 {
                return None;
            }
        }

        // An origin inside the box leaves dnear behind the origin; clamp
        // so the reported distance is never negative.
        Some(dnear.max(0.0))
    }

    /// Grows this box to the smallest one containing both boxes
    pub fn merge_box(&mut self, bounds: &Self) {
        self.min = self.min.inf(&bounds.min);
        self.max = self.max.sup(&bounds.max);
    }

    /// Grows this box to contain the given sphere
    pub fn merge_sphere(&mut self, sphere: &BoundingSphere) {
        let extent = Vec3::repeat(sphere.radius);
        self.min = self.min.inf(&(sphere.center - extent));
        self.max = self.max.sup(&(sphere.center + extent));
    }

    /// Transforms the box by a matrix
    ///
    /// All eight corners are transformed and the new min/max recomputed,
    /// which stays correct (if conservative) under arbitrary rotation and
    /// scale.
    pub fn transform(&mut self, matrix: &Mat4) {
        let corners = self.corners();

        let first = math::transform_point(matrix, corners[0]);
        let mut new_min = first;
        let mut new_max = first;
        for corner in &corners[1..] {
            let point = math::transform_point(matrix, *corner);
            new_min = new_min.inf(&point);
            new_max = new_max.sup(&point);
        }

        self.min = new_min;
        self.max = new_max;
    }

    /// Returns this box transformed by a matrix
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut bounds = *self;
        bounds.transform(matrix);
        bounds
    }
}
