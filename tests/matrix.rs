#![cfg(not(target_arch = "wasm32"))]

use std::f32::consts::PI;

use transform2d_wasm::m3::Mat3;
use transform2d_wasm::scene::{angle_from_degrees, RotationDirection, Scene};

const EPS: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

fn approx_eq2(a: (f32, f32), b: (f32, f32)) -> bool {
    approx_eq(a.0, b.0) && approx_eq(a.1, b.1)
}

fn approx_eq_mat(a: &Mat3, b: &Mat3) -> bool {
    a.to_rows()
        .iter()
        .zip(b.to_rows().iter())
        .all(|(x, y)| (x - y).abs() < EPS)
}

#[test]
fn projection_maps_pixel_corners_to_clip_corners() {
    let (w, h) = (640.0, 480.0);
    let p = Mat3::projection(w, h);

    assert!(approx_eq2(p.transform_point(0.0, 0.0), (-1.0, 1.0)));
    assert!(approx_eq2(p.transform_point(w, 0.0), (1.0, 1.0)));
    assert!(approx_eq2(p.transform_point(0.0, h), (-1.0, -1.0)));
    assert!(approx_eq2(p.transform_point(w, h), (1.0, -1.0)));

    // Centre of the viewport lands on the clip-space origin.
    assert!(approx_eq2(p.transform_point(w / 2.0, h / 2.0), (0.0, 0.0)));
}

#[test]
fn multiply_is_associative() {
    let a = Mat3::projection(1920.0, 1080.0);
    let b = Mat3::translation(37.0, -12.5).rotate(0.9);
    let c = Mat3::scaling(2.0, -3.0).translate(5.0, 8.0);

    let left = a.multiply(&b).multiply(&c);
    let right = a.multiply(&b.multiply(&c));
    assert!(approx_eq_mat(&left, &right), "{left:?} vs {right:?}");
}

#[test]
fn identity_parameters_leave_matrix_unchanged() {
    let m = Mat3::projection(800.0, 600.0)
        .translate(120.0, 45.0)
        .rotate(1.3);

    assert!(approx_eq_mat(&m.translate(0.0, 0.0), &m));
    assert!(approx_eq_mat(&m.rotate(0.0), &m));
    assert!(approx_eq_mat(&m.scale(1.0, 1.0), &m));
    assert!(approx_eq_mat(&m.multiply(&Mat3::identity()), &m));
    assert!(approx_eq_mat(&Mat3::identity().multiply(&m), &m));
}

#[test]
fn rotation_has_full_turn_period() {
    let m = Mat3::projection(300.0, 200.0).translate(10.0, 20.0);
    let angle = 0.6;

    let once = m.rotate(angle);
    let wrapped = m.rotate(angle + 2.0 * PI);
    assert!(approx_eq_mat(&once, &wrapped));
}

#[test]
fn translated_local_origin_matches_direct_projection() {
    // Chaining translate after projection moves the local origin: the result
    // at (0,0) must match projecting pixel (50,50) directly.
    let chained = Mat3::projection(100.0, 100.0)
        .translate(50.0, 50.0)
        .rotate(0.0)
        .scale(1.0, 1.0);
    let direct = Mat3::projection(100.0, 100.0);

    assert!(approx_eq2(
        chained.transform_point(0.0, 0.0),
        direct.transform_point(50.0, 50.0)
    ));
}

#[test]
fn chained_calls_apply_to_points_in_reverse_order() {
    // translate then rotate: the rotation happens in the translated frame,
    // so the point rotates about the translated origin, not the pixel origin.
    let m = Mat3::translation(10.0, 0.0).rotate(PI / 2.0);
    assert!(approx_eq2(m.transform_point(1.0, 0.0), (10.0, 1.0)));

    // rotate then translate: the offset is rotated along with the frame.
    let m = Mat3::rotation(PI / 2.0).translate(10.0, 0.0);
    assert!(approx_eq2(m.transform_point(1.0, 0.0), (0.0, 11.0)));
}

#[test]
fn negative_scale_mirrors_x_axis() {
    let m = Mat3::scaling(2.0, 3.0);
    let (x, y) = m.transform_point(1.0, 0.0);
    let (mx, my) = m.scale(-1.0, 1.0).transform_point(1.0, 0.0);
    assert!(approx_eq(mx, -x));
    assert!(approx_eq(my, y));

    let (ix, _) = Mat3::identity().scale(-1.0, 1.0).transform_point(1.0, 0.0);
    assert!(approx_eq(ix, -1.0));
}

#[test]
fn zero_scale_collapses_without_erroring() {
    let m = Mat3::projection(100.0, 100.0).scale(0.0, 1.0);
    let (x0, _) = m.transform_point(12.0, 34.0);
    let (x1, _) = m.transform_point(-99.0, 34.0);
    assert!(approx_eq(x0, x1));
}

#[test]
fn operations_never_mutate_their_inputs() {
    let a = Mat3::projection(100.0, 50.0).rotate(0.4);
    let b = Mat3::translation(7.0, -3.0);
    let a_before = a;
    let b_before = b;

    let _ = a.multiply(&b);
    let _ = a.translate(1.0, 2.0);
    let _ = a.rotate(0.5);
    let _ = a.scale(2.0, 2.0);
    let _ = a * b;

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn column_major_layout_transposes_rows() {
    let m = Mat3::from_rows([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 1.0]);
    assert_eq!(
        m.to_column_major(),
        [1.0, 4.0, 0.0, 2.0, 5.0, 0.0, 3.0, 6.0, 1.0]
    );
}

#[test]
fn scene_matrix_matches_hand_chained_builder() {
    let scene = Scene {
        translation: [200.0, 150.0],
        angle_radians: 0.8,
        scale: [1.5, -0.5],
    };
    let expected = Mat3::projection(1280.0, 720.0)
        .translate(200.0, 150.0)
        .rotate(0.8)
        .scale(1.5, -0.5);

    assert!(approx_eq_mat(&scene.matrix(1280.0, 720.0), &expected));
}

#[test]
fn default_scene_sits_at_demo_start_position() {
    let scene = Scene::default();
    assert_eq!(scene.translation, [200.0, 150.0]);
    assert_eq!(scene.angle_radians, 0.0);
    assert_eq!(scene.scale, [1.0, 1.0]);
}

#[test]
fn angle_conventions_are_mirror_images() {
    let cw = angle_from_degrees(30.0, RotationDirection::Clockwise);
    let ccw = angle_from_degrees(30.0, RotationDirection::CounterClockwise);

    assert!(approx_eq(cw, 30.0_f32.to_radians()));
    assert!(approx_eq(ccw, 330.0_f32.to_radians()));

    // Both conventions agree at the slider endpoints (mod a full turn).
    let m = Mat3::identity();
    assert!(approx_eq_mat(
        &m.rotate(angle_from_degrees(0.0, RotationDirection::Clockwise)),
        &m.rotate(angle_from_degrees(0.0, RotationDirection::CounterClockwise)),
    ));
    assert!(approx_eq_mat(
        &m.rotate(angle_from_degrees(360.0, RotationDirection::Clockwise)),
        &m.rotate(angle_from_degrees(360.0, RotationDirection::CounterClockwise)),
    ));
}
