use rod_anchor::math::{Quaternion, Rotation, Transform, Vector3};
use std::f32::consts::PI;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_transform(rng: &mut StdRng) -> Transform {
    let axis = Vector3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    let axis = if axis.is_zero() { Vector3::unit_y() } else { axis };
    let rotation = Quaternion::from_axis_angle(axis, rng.gen_range(-PI..PI));
    let position = Vector3::new(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    );
    Transform::new(position, rotation)
}

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    assert_eq!(v1 + v2, Vector3::new(5.0, 7.0, 9.0));
    assert_eq!(v2 - v1, Vector3::new(3.0, 3.0, 3.0));
    assert_eq!(v1 * 2.0, Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(2.0 * v1, v1 * 2.0);
    assert_eq!(-v1, Vector3::new(-1.0, -2.0, -3.0));

    assert_eq!(v1.dot(&v2), 32.0);
    assert_eq!(Vector3::unit_x().cross(&Vector3::unit_y()), Vector3::unit_z());

    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);

    // Zero vectors stay zero instead of turning into NaN
    assert_eq!(Vector3::zero().normalize(), Vector3::zero());
}

#[test]
fn test_vector3_approx_comparisons() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(1.0 + 1e-7, 2.0, 3.0 - 1e-7);

    assert_relative_eq!(a, b, epsilon = 1e-6);
    assert_abs_diff_eq!(a, Vector3::new(1.05, 2.0, 3.0), epsilon = 0.1);
}

#[test]
fn test_quaternion_rotation() {
    let q = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), PI / 2.0);
    assert_relative_eq!(q.length(), 1.0);

    // 90 degrees around Y takes +x to -z
    let rotated = q.rotate_vector(Vector3::unit_x());
    assert_abs_diff_eq!(rotated, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);

    // Composition applies the right-hand rotation first
    let q1 = Quaternion::from_axis_angle(Vector3::unit_x(), PI / 4.0);
    let q2 = Quaternion::from_axis_angle(Vector3::unit_y(), PI / 4.0);
    let v = Vector3::unit_z();
    assert_abs_diff_eq!(
        (q2 * q1).rotate_vector(v),
        q2.rotate_vector(q1.rotate_vector(v)),
        epsilon = 1e-5
    );
}

#[test]
fn test_rotation_matrix_matches_quaternion() {
    let q = Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, -0.5), 1.2);
    let v = Vector3::new(0.3, -1.0, 2.0);

    let by_matrix = Vector3::from_nalgebra(&(q.to_rotation_matrix() * v.to_nalgebra()));
    assert_abs_diff_eq!(by_matrix, q.rotate_vector(v), epsilon = 1e-5);
}

#[test]
fn test_transform_point_and_inverse() {
    let transform = Transform::new(
        Vector3::new(1.0, 2.0, 3.0),
        Quaternion::from_axis_angle(Vector3::unit_y(), PI / 2.0),
    );

    // Rotate (1,0,0) to (0,0,-1), then translate
    let point = Vector3::unit_x();
    let transformed = transform * point;
    assert_abs_diff_eq!(transformed, Vector3::new(1.0, 2.0, 2.0), epsilon = 1e-5);

    assert_abs_diff_eq!(transform.inverse() * transformed, point, epsilon = 1e-5);
    assert_abs_diff_eq!(transform.inverse_transform_point(transformed), point, epsilon = 1e-5);
}

#[test]
fn test_transform_inverse_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let transform = random_transform(&mut rng);
        let p = Vector3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        );

        assert_abs_diff_eq!(transform * (transform.inverse() * p), p, epsilon = 1e-3);
        assert_abs_diff_eq!(transform.inverse() * (transform * p), p, epsilon = 1e-3);
    }
}

#[test]
fn test_transform_matches_nalgebra_isometry() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let transform = random_transform(&mut rng);
        let iso = transform.to_isometry();
        let p = Vector3::new(0.5, -2.0, 1.5);

        let ours = transform * p;
        let theirs = Vector3::from_nalgebra(&(iso * nalgebra::Point3::from(p.to_nalgebra())).coords);
        assert_abs_diff_eq!(ours, theirs, epsilon = 1e-4);

        let inv_ours = transform.inverse() * p;
        let inv_theirs = Vector3::from_nalgebra(&(iso.inverse() * nalgebra::Point3::from(p.to_nalgebra())).coords);
        assert_abs_diff_eq!(inv_ours, inv_theirs, epsilon = 1e-4);

        let back = Transform::from_isometry(&iso);
        assert_abs_diff_eq!(back * p, ours, epsilon = 1e-4);
    }
}

#[test]
fn test_transform_combine() {
    let a = Transform::new(Vector3::new(1.0, 0.0, 0.0), Quaternion::from_axis_angle(Vector3::unit_z(), PI / 2.0));
    let b = Transform::new(Vector3::new(0.0, 0.0, 3.0), Quaternion::from_axis_angle(Vector3::unit_x(), PI / 3.0));
    let p = Vector3::new(0.2, 0.4, -1.0);

    assert_abs_diff_eq!(a.combine(&b) * p, b * (a * p), epsilon = 1e-5);
}

#[test]
fn test_quaternion_axis_angle_round_trip() {
    let axis = Vector3::new(1.0, 1.0, 0.0).normalize();
    let mut q = Quaternion::from_axis_angle(axis, 0.6);

    assert_relative_eq!(q.angle(), 0.6, epsilon = 1e-5);
    assert_abs_diff_eq!(q.axis(), axis, epsilon = 1e-5);

    q *= Quaternion::from_axis_angle(axis, 0.4);
    assert_relative_eq!(q.angle(), 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(q.normalize().to_nalgebra().angle(), 1.0, epsilon = 1e-5);
}
