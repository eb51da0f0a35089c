//! Bounding sphere primitive
//!
//! A center plus a radius. A radius of zero marks the empty sphere. The
//! canonical sphere-vs-sphere, sphere-vs-box, sphere-vs-plane and
//! sphere-vs-ray algorithms live here; the other types forward to them.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::foundation::math::{self, utils, Mat4, Vec3};
use crate::frustum::Frustum;
use crate::plane::{Plane, Side};
use crate::ray::Ray;

/// A sphere used as a bounding volume
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// The center of the sphere
    pub center: Vec3,
    /// The radius of the sphere (non-negative by convention, not enforced)
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a sphere from a center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// The empty sphere: zero radius at the origin
    pub fn empty() -> Self {
        Self::default()
    }

    /// True iff the sphere has zero radius
    pub fn is_empty(&self) -> bool {
        self.radius == 0.0
    }

    /// Replaces center and radius
    pub fn set(&mut self, center: Vec3, radius: f32) {
        self.center = center;
        self.radius = radius;
    }

    /// Sets this sphere to one circumscribing the given box
    ///
    /// The center is the box midpoint and the radius the distance to
    /// `bounds.max`. This is not the tightest sphere over all eight
    /// corners, but since `max` is the corner farthest from the midpoint
    /// along every axis it does contain the whole box.
    pub fn set_box(&mut self, bounds: &BoundingBox) {
        self.center = bounds.center();
        self.radius = (bounds.max - self.center).magnitude();
    }

    /// Distance from the sphere's center to a point
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.center).magnitude()
    }

    /// True iff every point lies on or inside the sphere
    pub fn contains_points(&self, points: &[Vec3]) -> bool {
        points.iter().all(|p| self.distance_to(*p) <= self.radius)
    }

    /// True iff the two spheres overlap or touch
    pub fn intersects_sphere(&self, sphere: &Self) -> bool {
        (sphere.center - self.center).magnitude() <= self.radius + sphere.radius
    }

    /// True iff the sphere overlaps or touches the box
    pub fn intersects_box(&self, bounds: &BoundingBox) -> bool {
        // Clamp the center into the box to get the closest point on or
        // inside it, then compare that distance against the radius.
        let closest = Vec3::new(
            utils::clamp(self.center.x, bounds.min.x, bounds.max.x),
            utils::clamp(self.center.y, bounds.min.y, bounds.max.y),
            utils::clamp(self.center.z, bounds.min.z, bounds.max.z),
        );
        (closest - self.center).magnitude() <= self.radius
    }

    /// True iff the sphere is at least partially inside the frustum
    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        // Inside means on the front side of, or touching, all six planes.
        frustum
            .planes()
            .iter()
            .all(|plane| self.intersects_plane(plane) != Side::Back)
    }

    /// Classifies the sphere relative to a plane (touching counts as
    /// intersecting)
    pub fn intersects_plane(&self, plane: &Plane) -> Side {
        let distance = plane.distance_to(self.center);
        if distance.abs() <= self.radius {
            Side::Intersecting
        } else if distance > 0.0 {
            Side::Front
        } else {
            Side::Back
        }
    }

    /// Distance along a ray to the sphere, or `None` if the ray misses it
    ///
    /// When the origin is inside the sphere the exit distance is returned.
    pub fn intersects_ray(&self, ray: &Ray) -> Option<f32> {
        let v = ray.origin() - self.center;

        // Quadratic in t with A = 1 because the direction is unit length.
        let b = 2.0 * v.dot(&ray.direction());
        let c = v.magnitude_squared() - self.radius * self.radius;
        let discriminant = b * b - 4.0 * c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t0 = (-b - sqrt_disc) * 0.5;
        let t1 = (-b + sqrt_disc) * 0.5;

        // The smaller positive root; if the origin is inside (t0 <= 0 < t1)
        // this falls through to the exit root t1.
        let t = if t0 > 0.0 && t0 < t1 { t0 } else { t1 };
        (t > 0.0).then_some(t)
    }

    /// Grows this sphere to the smallest one containing both spheres
    pub fn merge_sphere(&mut self, sphere: &Self) {
        if sphere.is_empty() {
            return;
        }

        let v = self.center - sphere.center;
        let d = v.magnitude();

        // One sphere nested in the other: keep the larger. The inclusive
        // comparisons also catch coincident centers, so the division
        // below never sees d == 0.
        if d <= sphere.radius - self.radius {
            *self = *sphere;
            return;
        }
        if d <= self.radius - sphere.radius {
            return;
        }

        let unit = v / d;
        let radius = (self.radius + sphere.radius + d) * 0.5;
        self.center = sphere.center + unit * (radius - sphere.radius);
        self.radius = radius;
    }

    /// Grows this sphere to contain the given box
    pub fn merge_box(&mut self, bounds: &BoundingBox) {
        if bounds.is_empty() {
            return;
        }

        // The box corner farthest from the center, picked per axis.
        let farthest = Vec3::new(
            farther_extreme(self.center.x, bounds.min.x, bounds.max.x),
            farther_extreme(self.center.y, bounds.min.y, bounds.max.y),
            farther_extreme(self.center.z, bounds.min.z, bounds.max.z),
        );

        let v = self.center - farthest;
        let distance = v.magnitude();

        // Box already inside the sphere.
        if distance <= self.radius {
            return;
        }

        // Grow to just reach the farthest corner, keeping the opposite
        // extreme of the old sphere fixed.
        let radius = (self.radius + distance) * 0.5;
        self.center = farthest + (v / distance) * radius;
        self.radius = radius;
    }

    /// Transforms the sphere by a matrix
    ///
    /// The center is transformed as a point; the radius is scaled by the
    /// largest per-axis scale factor so a non-uniform scale never
    /// under-estimates the sphere.
    pub fn transform(&mut self, matrix: &Mat4) {
        self.center = math::transform_point(matrix, self.center);
        let scale = math::scale_components(matrix);
        self.radius *= scale.x.max(scale.y).max(scale.z);
    }

    /// Returns this sphere transformed by a matrix
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut sphere = *self;
        sphere.transform(matrix);
        sphere
    }
}

// The box extreme (min or max) farther from the given center coordinate.
fn farther_extreme(center: f32, min: f32, max: f32) -> f32 {
    if (min - center).abs() > (max - center).abs() {
        min
    } else {
        max
    }
}
