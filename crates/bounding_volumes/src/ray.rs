//! Ray primitive for picking and distance queries
//!
//! A ray is an origin plus a unit direction. Distance-returning queries
//! report `Option<f32>` where `None` means no intersection; the distances
//! are parametric along the (normalized) direction, so they are
//! world-space lengths.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::foundation::math::{constants, Vec3};
use crate::frustum::Frustum;
use crate::plane::Plane;
use crate::sphere::BoundingSphere;

/// A ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            direction: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

impl Ray {
    /// Creates a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let mut ray = Self { origin, direction };
        ray.normalize();
        ray
    }

    /// The ray's origin
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The ray's unit direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Replaces the origin
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Replaces the direction, renormalizing it
    ///
    /// A zero direction is stored as-is; it cannot be normalized and is
    /// not fixed up to any default.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
        self.normalize();
    }

    /// Replaces origin and direction, renormalizing the direction
    pub fn set(&mut self, origin: Vec3, direction: Vec3) {
        self.origin = origin;
        self.direction = direction;
        self.normalize();
    }

    /// The point along the ray at parametric distance `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to a sphere, or `None` if the ray misses it
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        sphere.intersects_ray(self)
    }

    /// Distance to a bounding box, or `None` if the ray misses it
    ///
    /// An origin already inside the box reports a hit at distance 0.
    pub fn intersects_box(&self, bounds: &BoundingBox) -> Option<f32> {
        bounds.intersects_ray(self)
    }

    /// Distance to a plane, or `None` if the ray is parallel to it or it
    /// lies behind the origin
    ///
    /// An origin within epsilon of the plane reports a hit at distance 0.
    pub fn intersects_plane(&self, plane: &Plane) -> Option<f32> {
        let alpha = plane.distance_to(self.origin);
        if alpha.abs() < constants::EPSILON {
            return Some(0.0);
        }

        let dot = plane.normal().dot(&self.direction);
        if dot == 0.0 {
            return None;
        }

        let d = -alpha / dot;
        if d < 0.0 {
            None
        } else {
            Some(d)
        }
    }

    /// Entry distance into a frustum, or `None` if the ray misses it
    ///
    /// If the origin sits behind any frustum plane that the ray never
    /// reaches, the ray misses the whole frustum. Otherwise the result is
    /// the smallest positive distance to any of the six planes, or 0 when
    /// the origin is already on or inside the boundary.
    pub fn intersects_frustum(&self, frustum: &Frustum) -> Option<f32> {
        let mut nearest: Option<f32> = None;

        for plane in &frustum.planes() {
            let hit = self.intersects_plane(plane);

            if hit.is_none() && plane.distance_to(self.origin) < 0.0 {
                return None;
            }

            if let Some(d) = hit {
                if d > 0.0 {
                    nearest = Some(nearest.map_or(d, |n| n.min(d)));
                }
            }
        }

        Some(nearest.unwrap_or(0.0))
    }

    // Normalizes the direction; a zero vector stays zero.
    fn normalize(&mut self) {
        if let Some(unit) = self.direction.try_normalize(0.0) {
            self.direction = unit;
        }
    }
}
