use super::*;
use approx::assert_abs_diff_eq;

fn three_anchor_path(mode: ControlMode) -> ControlPath {
    let mut path = ControlPath::from_points(
        &[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(10.0, 0.0, 0.0),
        ],
        false,
        PathSpace::Xyz,
    )
    .expect("Pfad erwartet");
    path.set_control_mode(mode);
    path
}

fn assert_vec_eq(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
}

#[test]
fn test_default_path_layout() {
    let path = ControlPath::default();
    assert_eq!(path.num_points(), 4);
    assert_eq!(path.num_anchors(), 2);
    assert_eq!(path.num_segments(), 1);
    assert_eq!(path.control_mode(), ControlMode::Aligned);
    assert_eq!(path.version(), 0);
    assert_eq!(path[0], Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(path[1], Vec3::new(-1.0, 0.5, 0.0));
    assert_eq!(path[2], Vec3::new(1.0, -0.5, 0.0));
    assert_eq!(path[3], Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(path.anchor_twist_angles(), &[0.0, 0.0]);
}

#[test]
fn test_new_closed_and_xz() {
    let closed = ControlPath::new(Vec3::ZERO, true, PathSpace::Xyz);
    assert_eq!(closed.num_points(), 6);
    assert_eq!(closed.num_anchors(), 2);
    assert_eq!(closed.num_segments(), 2);
    assert_eq!(closed.version(), 0);
    // Rückführungs-Segment endet am ersten Anker
    assert_eq!(closed.segment_points(1)[3], closed[0]);

    let xz = ControlPath::new(Vec3::new(1.0, 5.0, 1.0), false, PathSpace::Xz);
    assert!(xz.points().iter().all(|p| p.y == 0.0));
    assert_eq!(xz[1], Vec3::new(0.0, 0.0, 1.5));
}

#[test]
fn test_from_points_requires_two_anchors() {
    assert!(ControlPath::from_points(&[Vec3::ZERO], false, PathSpace::Xyz).is_err());
    assert!(ControlPath::from_points(&[], false, PathSpace::Xyz).is_err());
    assert!(
        ControlPath::from_points(&[Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)], false, PathSpace::Xyz)
            .is_err()
    );
}

#[test]
fn test_from_points_two_anchor_controls_at_quarter() {
    let path = ControlPath::from_points(
        &[Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
        false,
        PathSpace::Xyz,
    )
    .expect("Pfad erwartet");
    assert_eq!(path.control_mode(), ControlMode::Automatic);
    assert_vec_eq(path[1], Vec3::new(-1.0, 0.0, 0.0));
    assert_vec_eq(path[2], Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(path.version(), 0);
}

#[test]
fn test_from_points_2d_maps_into_plane() {
    let path = ControlPath::from_points_2d(
        &[Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0), Vec2::new(8.0, 0.0)],
        false,
        PathSpace::Xz,
    )
    .expect("Pfad erwartet");
    assert_eq!(path.num_anchors(), 3);
    assert_vec_eq(path[3], Vec3::new(4.0, 0.0, 2.0));
    assert!(path.points().iter().all(|p| p.y == 0.0));
    assert_eq!(path.anchor_twist_angles().len(), 3);
}

#[test]
fn test_add_last_aligned_uses_half_gap() {
    let mut path = ControlPath::default();
    let new_anchor = Vec3::new(6.0, 0.0, 0.0);
    path.add_last(new_anchor);

    assert_eq!(path.num_anchors(), 3);
    assert_eq!(path.num_points(), 7);
    assert_eq!(path[6], new_anchor);
    assert_eq!(path.version(), 1);

    let anchor = path[3];
    let outgoing = path[4];
    // Halbe Distanz zum neuen Anker, kolinear mit dem eingehenden Kontrollpunkt
    assert_abs_diff_eq!(anchor.distance(outgoing), 2.0, epsilon = 1e-5);
    let incoming_dir = (anchor - path[2]).normalize();
    let outgoing_dir = (outgoing - anchor).normalize();
    assert_vec_eq(incoming_dir, outgoing_dir);
    assert_vec_eq(path[5], (outgoing + new_anchor) * 0.5);
}

#[test]
fn test_add_mirrored_uses_half_gap() {
    let mut path = ControlPath::default();
    path.set_control_mode(ControlMode::Mirrored);
    let existing_dir = (path[3] - path[2]).normalize();

    path.add_last(Vec3::new(40.0, 0.0, 0.0));
    let anchor = path[3];
    assert_abs_diff_eq!(anchor.distance(path[4]), 19.0, epsilon = 1e-4);
    assert_vec_eq((path[4] - anchor).normalize(), existing_dir);

    path.add_first(Vec3::new(-12.0, 0.0, 0.0));
    let first = path[3];
    assert_eq!(first, Vec3::new(-2.0, 0.0, 0.0));
    assert_abs_diff_eq!(first.distance(path[2]), 5.0, epsilon = 1e-4);
    assert_vec_eq((path[2] - first).normalize(), (first - path[4]).normalize());
}

#[test]
fn test_add_first_duplicates_twist_angle() {
    let mut path = ControlPath::default();
    path.set_anchor_normal_angle(0, 30.0);
    path.add_first(Vec3::new(-6.0, 0.0, 0.0));

    assert_eq!(path.num_anchors(), 3);
    assert_eq!(path[0], Vec3::new(-6.0, 0.0, 0.0));
    assert_eq!(path.anchor_twist_angles(), &[30.0, 30.0, 0.0]);
    // Alter erster Anker liegt jetzt auf Index 3
    assert_eq!(path[3], Vec3::new(-2.0, 0.0, 0.0));
}

#[test]
fn test_add_to_closed_path_is_noop() {
    let mut path = ControlPath::new(Vec3::ZERO, true, PathSpace::Xyz);
    let before = path.points().to_vec();
    path.add_last(Vec3::new(9.0, 9.0, 9.0));
    path.add_first(Vec3::new(-9.0, 9.0, 9.0));
    assert_eq!(path.points(), before.as_slice());
    assert_eq!(path.version(), 0);
}

#[test]
fn test_move_anchor_drags_controls() {
    let mut path = ControlPath::default();
    let delta = Vec3::new(0.0, 1.0, 2.0);
    let control_before = path[2];
    path.move_point(3, path[3] + delta);

    assert_eq!(path[3], Vec3::new(2.0, 1.0, 2.0));
    assert_vec_eq(path[2], control_before + delta);
    assert_eq!(path.version(), 1);
}

#[test]
fn test_move_point_round_trip_and_projection() {
    let mut path = ControlPath::new(Vec3::ZERO, false, PathSpace::Xy);
    path.move_point(3, Vec3::new(3.0, 1.0, 7.0));
    assert_eq!(path[3], Vec3::new(3.0, 1.0, 0.0));

    let mut free = ControlPath::default();
    free.set_control_mode(ControlMode::Free);
    let target = Vec3::new(0.25, 3.5, -1.0);
    free.move_point(1, target);
    assert_eq!(free[1], target);
}

#[test]
fn test_move_control_aligned_keeps_sibling_length() {
    let mut path = three_anchor_path(ControlMode::Aligned);
    let anchor = path[3];
    let sibling_length = anchor.distance(path[4]);

    path.move_point(2, anchor + Vec3::new(-3.0, 0.0, 0.0));

    assert_abs_diff_eq!(anchor.distance(path[4]), sibling_length, epsilon = 1e-4);
    assert_vec_eq((path[4] - anchor).normalize(), Vec3::X);
}

#[test]
fn test_move_control_mirrored_copies_length() {
    let mut path = three_anchor_path(ControlMode::Mirrored);
    let anchor = path[3];

    path.move_point(4, anchor + Vec3::new(0.0, 2.0, 0.0));

    assert_vec_eq(path[2], anchor - Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_move_control_automatic_is_noop() {
    let mut path = three_anchor_path(ControlMode::Automatic);
    let version = path.version();
    let before = path[1];
    path.move_point(1, Vec3::new(100.0, 100.0, 100.0));
    assert_eq!(path[1], before);
    assert_eq!(path.version(), version);
}

#[test]
fn test_move_anchor_automatic_rederives_controls() {
    let mut path = three_anchor_path(ControlMode::Automatic);
    path.move_point(3, Vec3::new(5.0, 0.0, 10.0));
    let anchor = path[3];
    // Kontrollpunkte symmetrisch zum verschobenen Anker, parallel zur Sehne der Nachbarn
    let a = (path[2] - anchor).normalize();
    let b = (path[4] - anchor).normalize();
    assert_vec_eq(a, -b);
    assert_abs_diff_eq!(a.z, 0.0, epsilon = 1e-5);
}

#[test]
fn test_remove_segment_refuses_two_segments() {
    let mut path = three_anchor_path(ControlMode::Aligned);
    let before = path.points().to_vec();
    let version = path.version();

    assert!(!path.remove_segment(3));
    assert_eq!(path.points(), before.as_slice());
    assert_eq!(path.version(), version);
}

#[test]
fn test_remove_segment_drops_anchor_and_twist() {
    let mut path = three_anchor_path(ControlMode::Aligned);
    path.add_last(Vec3::new(15.0, 0.0, 5.0));
    path.set_anchor_normal_angle(1, 45.0);
    path.set_anchor_normal_angle(2, 90.0);
    assert_eq!(path.anchor_twist_angles(), &[0.0, 45.0, 90.0, 0.0]);
    let version = path.version();

    assert!(path.remove_segment(3));
    assert_eq!(path.num_anchors(), 3);
    assert_eq!(path[3], Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(path.anchor_twist_angles(), &[0.0, 90.0, 0.0]);
    assert!(path.version() > version);
}

#[test]
fn test_remove_first_anchor_of_closed_path_rewires_loop() {
    let mut path = ControlPath::from_points(
        &[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ],
        true,
        PathSpace::Xyz,
    )
    .expect("Pfad erwartet");
    path.set_control_mode(ControlMode::Free);
    let incoming_of_second = path[2];

    assert!(path.remove_segment(0));
    assert_eq!(path.num_anchors(), 3);
    assert_eq!(path.num_points(), 9);
    assert_eq!(path[0], Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(path[8], incoming_of_second);
}

#[test]
fn test_split_segment_preserves_shape() {
    let mut path = ControlPath::default();
    let original = path.segment_points(0);
    let anchor = bezier::segment_point(&original, 0.5);

    path.split_segment(anchor, 0, 0.5);

    assert_eq!(path.num_anchors(), 3);
    assert_vec_eq(path[3], anchor);
    for i in 0..=8 {
        let u = i as f32 / 8.0;
        assert_vec_eq(
            bezier::segment_point(&path.segment_points(0), u),
            bezier::segment_point(&original, 0.5 * u),
        );
        assert_vec_eq(
            bezier::segment_point(&path.segment_points(1), u),
            bezier::segment_point(&original, 0.5 + 0.5 * u),
        );
    }
}

#[test]
fn test_split_segment_interpolates_twist_angle() {
    let mut path = ControlPath::default();
    path.set_anchor_normal_angle(0, 350.0);
    path.set_anchor_normal_angle(1, 30.0);
    let anchor = bezier::segment_point(&path.segment_points(0), 0.25);

    path.split_segment(anchor, 0, 0.25);

    // Kürzester Weg 350° → 30° über 0°, ein Viertel davon = 0°
    assert_eq!(path.anchor_twist_angles().len(), 3);
    let angle = path.anchor_normal_angle(1);
    assert!(angle < 1e-3 || angle > 360.0 - 1e-3, "Winkel {}", angle);
}

#[test]
fn test_split_segment_clamps_t_and_handles_automatic() {
    let mut path = three_anchor_path(ControlMode::Automatic);
    path.split_segment(Vec3::new(2.5, 0.0, 3.0), 0, 7.0);
    assert_eq!(path.num_anchors(), 4);
    assert_eq!(path[3], Vec3::new(2.5, 0.0, 3.0));
    assert!(path.points().iter().all(|p| p.is_finite()));
}

#[test]
fn test_set_anchor_normal_angle_wraps_and_notifies_on_change() {
    let mut path = ControlPath::default();
    path.set_anchor_normal_angle(1, 370.0);
    assert_abs_diff_eq!(path.anchor_normal_angle(1), 10.0, epsilon = 1e-4);
    let version = path.version();

    path.set_anchor_normal_angle(1, 10.0);
    assert_eq!(path.version(), version);

    path.set_anchor_normal_angle(1, -90.0);
    assert_abs_diff_eq!(path.anchor_normal_angle(1), 270.0, epsilon = 1e-4);
    assert_eq!(path.version(), version + 1);

    path.set_global_normal_angle(45.0);
    path.reset_normal_angles();
    assert_eq!(path.anchor_twist_angles(), &[0.0, 0.0]);
    assert_eq!(path.global_normal_angle(), 0.0);
}

#[test]
fn test_set_closed_adds_and_removes_wrap_controls() {
    let mut path = ControlPath::default();
    path.set_closed(true);
    assert_eq!(path.num_points(), 6);
    assert_eq!(path.num_anchors(), 2);
    // Aligned: Rückführungs-Kontrollpunkte mit halber Ankerdistanz
    assert_abs_diff_eq!(path[3].distance(path[4]), 2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(path[0].distance(path[5]), 2.0, epsilon = 1e-5);

    path.set_closed(false);
    assert_eq!(path.num_points(), 4);
    assert_eq!(path.num_anchors(), 2);
}

#[test]
fn test_set_space_swaps_plane_axes() {
    let mut path = ControlPath::new(Vec3::ZERO, false, PathSpace::Xy);
    path.set_space(PathSpace::Xz);
    assert_eq!(path[1], Vec3::new(-1.0, 0.0, 0.5));

    path.set_space(PathSpace::Xyz);
    assert_eq!(path[1], Vec3::new(-1.0, 0.0, 0.5));
}

#[test]
fn test_set_space_from_xyz_drops_flattest_axis() {
    let mut path = ControlPath::from_points(
        &[
            Vec3::new(0.0, 0.1, 0.0),
            Vec3::new(5.0, 0.0, 4.0),
            Vec3::new(10.0, 0.1, 0.0),
        ],
        false,
        PathSpace::Xyz,
    )
    .expect("Pfad erwartet");
    path.set_space(PathSpace::Xy);

    // y ist die flachste Achse → z wandert nach y
    assert!(path.points().iter().all(|p| p.z == 0.0));
    assert_abs_diff_eq!(path[3].y, 4.0, epsilon = 1e-5);
}

#[test]
fn test_auto_control_length_scales_handles() {
    let mut path = three_anchor_path(ControlMode::Automatic);
    let short = path[3].distance(path[4]);

    path.set_auto_control_length(0.6);
    let long = path[3].distance(path[4]);
    assert_abs_diff_eq!(long, short * 2.0, epsilon = 1e-4);

    path.set_auto_control_length(-5.0);
    assert_eq!(path.auto_control_length(), MIN_AUTO_CONTROL_LENGTH);
}

#[test]
fn test_bounds_cached_and_invalidated() {
    let mut path = ControlPath::default();
    let bounds = path.bounds();
    assert_abs_diff_eq!(bounds.min.x, -2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(bounds.max.x, 2.0, epsilon = 1e-5);
    assert!(bounds.max.y > 0.0 && bounds.max.y < 0.5);

    path.move_point(3, Vec3::new(8.0, 0.0, 0.0));
    assert_abs_diff_eq!(path.bounds().max.x, 8.0, epsilon = 1e-5);
    assert_eq!(path.bounds(), path.calculate_bounds());
}

#[test]
fn test_loop_index_wraps_negative() {
    let path = ControlPath::new(Vec3::ZERO, true, PathSpace::Xyz);
    assert_eq!(path.loop_index(-1), 5);
    assert_eq!(path.loop_index(6), 0);
}

#[test]
#[should_panic(expected = "Punkt-Index")]
fn test_move_point_out_of_range_panics() {
    let mut path = ControlPath::default();
    path.move_point(4, Vec3::ZERO);
}

#[test]
#[should_panic(expected = "Kein Anker-Index")]
fn test_remove_segment_requires_anchor_index() {
    let mut path = ControlPath::default();
    path.remove_segment(1);
}
