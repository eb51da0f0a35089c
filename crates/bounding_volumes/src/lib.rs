//! # Bounding Volumes
//!
//! Bounding-volume primitives and pairwise intersection queries for
//! frustum culling, picking and spatial bookkeeping.
//!
//! ## Types
//!
//! - [`Plane`] - infinite half-space primitive with a [`Side`] classification
//! - [`Ray`] - origin plus normalized direction, distance queries
//! - [`BoundingSphere`] - center plus radius
//! - [`BoundingBox`] - axis-aligned min/max corners
//! - [`Frustum`] - six planes derived from a view-projection matrix
//!
//! Every ordered pair of types can be intersection-tested; each geometric
//! relationship is implemented exactly once and the mirror direction
//! forwards to it, so `a.intersects_*(b)` and `b.intersects_*(a)` always
//! agree.
//!
//! ## Quick Start
//!
//! ```rust
//! use bounding_volumes::prelude::*;
//!
//! let frustum = Frustum::default();
//! let sphere = BoundingSphere::new(Vec3::zeros(), 1.0);
//! assert!(frustum.intersects_sphere(&sphere));
//!
//! let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
//! assert_eq!(ray.intersects_frustum(&frustum), Some(4.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

pub mod foundation;

pub mod bounding_box;
pub mod frustum;
pub mod plane;
pub mod ray;
pub mod sphere;

pub use bounding_box::BoundingBox;
pub use frustum::Frustum;
pub use plane::{Plane, Side};
pub use ray::Ray;
pub use sphere::BoundingSphere;

/// Common imports for users of the crate
pub mod prelude {
    pub use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
    pub use crate::{BoundingBox, BoundingSphere, Frustum, Plane, Ray, Side};
}
