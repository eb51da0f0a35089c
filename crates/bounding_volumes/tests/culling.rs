//! Cross-type intersection scenarios exercised through the public API

use approx::assert_relative_eq;
use bounding_volumes::prelude::*;

const EPSILON: f32 = 1e-5;

fn sphere_grid() -> Vec<BoundingSphere> {
    let mut spheres = Vec::new();
    for x in [-6.0_f32, -2.0, 0.0, 2.0, 6.0] {
        for radius in [0.5_f32, 2.0, 5.0] {
            spheres.push(BoundingSphere::new(Vec3::new(x, x * 0.5, -x), radius));
        }
    }
    spheres
}

fn box_grid() -> Vec<BoundingBox> {
    let mut boxes = Vec::new();
    for x in [-6.0_f32, -2.0, 0.0, 2.0, 6.0] {
        for half in [0.5_f32, 2.0, 5.0] {
            let center = Vec3::new(x, -x * 0.5, x);
            boxes.push(BoundingBox::new(
                center - Vec3::repeat(half),
                center + Vec3::repeat(half),
            ));
        }
    }
    boxes
}

#[test]
fn sphere_box_intersection_is_symmetric() {
    for sphere in sphere_grid() {
        for bounds in box_grid() {
            assert_eq!(
                sphere.intersects_box(&bounds),
                bounds.intersects_sphere(&sphere),
                "sphere {sphere:?} vs box {bounds:?}"
            );
        }
    }
}

#[test]
fn sphere_sphere_intersection_is_symmetric() {
    let spheres = sphere_grid();
    for a in &spheres {
        for b in &spheres {
            assert_eq!(a.intersects_sphere(b), b.intersects_sphere(a));
        }
    }
}

#[test]
fn frustum_delegation_is_symmetric() {
    let frustum = Frustum::default();
    for sphere in sphere_grid() {
        assert_eq!(
            frustum.intersects_sphere(&sphere),
            sphere.intersects_frustum(&frustum)
        );
    }
    for bounds in box_grid() {
        assert_eq!(
            frustum.intersects_box(&bounds),
            bounds.intersects_frustum(&frustum)
        );
    }
}

#[test]
fn plane_delegation_is_symmetric() {
    let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), -1.0);
    for sphere in sphere_grid() {
        assert_eq!(plane.intersects_sphere(&sphere), sphere.intersects_plane(&plane));
    }
    for bounds in box_grid() {
        assert_eq!(plane.intersects_box(&bounds), bounds.intersects_plane(&plane));
    }
}

#[test]
fn sphere_box_round_trip_loses_tightness() {
    let sphere = BoundingSphere::new(Vec3::new(1.0, 2.0, 3.0), 4.0);

    let mut bounds = BoundingBox::empty();
    bounds.set_sphere(&sphere);
    assert_relative_eq!(bounds.max - bounds.min, Vec3::repeat(8.0), epsilon = EPSILON);

    // Circumscribing that box reaches its corner, so the round trip grows
    // the radius by sqrt(3).
    let mut round_tripped = BoundingSphere::empty();
    round_tripped.set_box(&bounds);
    assert_relative_eq!(round_tripped.center, sphere.center, epsilon = EPSILON);
    assert_relative_eq!(round_tripped.radius, 4.0 * 3.0_f32.sqrt(), epsilon = EPSILON);
}

#[test]
fn perspective_camera_culls_a_scene() {
    let view = Mat4::look_at(
        Vec3::new(0.0, 5.0, 20.0),
        Vec3::zeros(),
        Vec3::new(0.0, 1.0, 0.0),
    );
    let projection = Mat4::perspective(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.5, 200.0);
    let frustum = Frustum::new(projection * view);

    // Around the look-at target.
    assert!(frustum.intersects_sphere(&BoundingSphere::new(Vec3::zeros(), 2.0)));
    assert!(frustum.intersects_box(&BoundingBox::new(
        Vec3::new(-3.0, -1.0, -3.0),
        Vec3::new(3.0, 1.0, 3.0),
    )));

    // Behind the camera.
    assert!(!frustum.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 5.0, 40.0), 2.0)));

    // A ray from the camera toward the target enters through the near
    // plane region, close to the camera. The camera apex sits on the side
    // planes, so the entry may round down to zero but never beyond the
    // target.
    let ray = Ray::new(Vec3::new(0.0, 5.0, 20.0), Vec3::zeros() - Vec3::new(0.0, 5.0, 20.0));
    let entry = ray.intersects_frustum(&frustum).unwrap();
    assert!((0.0..2.0).contains(&entry), "entry distance was {entry}");
}

#[test]
fn frustum_corners_line_up_with_contained_boxes() {
    let frustum = Frustum::default();
    let corners = frustum.corners();

    let mut bounds = BoundingBox::new(corners[0], corners[0]);
    for corner in &corners[1..] {
        bounds.merge_box(&BoundingBox::new(*corner, *corner));
    }

    // The identity frustum's corner hull is exactly the clip cube.
    assert_relative_eq!(bounds.min, Vec3::repeat(-1.0), epsilon = 1e-4);
    assert_relative_eq!(bounds.max, Vec3::repeat(1.0), epsilon = 1e-4);
}
