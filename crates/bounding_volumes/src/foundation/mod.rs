//! Foundation module - math types shared by the geometry primitives

pub mod math;
