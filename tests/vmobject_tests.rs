//! Vectorized Mobject Tests
//!
//! Tests for:
//! - Path construction and subpaths
//! - Curve queries (proportions, anchors, arc length)
//! - Partial paths and point alignment
//! - Anchor modes
//! - Style painting and matching
//! - Dashes
//! - The chainable wrapper

use glam::DVec3;

use kinema::core::constants::{BLUE, ORIGIN, RED, RIGHT, UP, WHITE};
use kinema::core::KinemaError;
use kinema::scene::{AnchorMode, Mobject, MobjectKey, Paint, Scene};

fn approx_vec(a: DVec3, b: DVec3) -> bool {
    a.abs_diff_eq(b, 1e-7)
}

fn unit_square_corners() -> Vec<DVec3> {
    vec![ORIGIN, RIGHT, RIGHT + UP, UP, ORIGIN]
}

fn unit_square(scene: &mut Scene) -> MobjectKey {
    scene.spawn(Mobject::vmobject_corners(&unit_square_corners()).unwrap())
}

// ============================================================================
// Path construction
// ============================================================================

#[test]
fn corners_make_one_curve_per_side() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let mob = scene.get(sq).unwrap();
    assert_eq!(mob.num_curves(), 4);
    assert!(mob.is_closed());
    assert_eq!(mob.subpaths().len(), 1);
}

#[test]
fn separate_subpaths_are_detected() {
    let mut mob = Mobject::vmobject(WHITE);
    mob.start_new_path(ORIGIN).unwrap();
    mob.add_line_to(RIGHT).unwrap();
    mob.start_new_path(UP * 2.0).unwrap();
    mob.add_line_to(UP * 2.0 + RIGHT).unwrap();
    mob.add_line_to(UP * 3.0 + RIGHT).unwrap();

    let subpaths = mob.subpaths();
    assert_eq!(subpaths.len(), 2);
    assert_eq!(subpaths[0].len(), 4);
    assert_eq!(subpaths[1].len(), 8);
}

#[test]
fn building_on_an_empty_path_fails() {
    let mut mob = Mobject::vmobject(WHITE);
    assert!(matches!(
        mob.add_cubic_bezier_curve_to(RIGHT, UP, RIGHT + UP),
        Err(KinemaError::EmptyPath(_))
    ));
}

#[test]
fn smooth_points_pass_through_anchors() {
    let anchors = [ORIGIN, RIGHT + UP, RIGHT * 2.0, RIGHT * 3.0 + UP];
    let mut mob = Mobject::vmobject(WHITE);
    mob.set_points_smoothly(&anchors).unwrap();
    assert_eq!(mob.num_curves(), 3);
    for (i, &anchor) in anchors.iter().enumerate().take(3) {
        assert!(approx_vec(mob.nth_curve_points(i).unwrap()[0], anchor));
    }
    assert!(approx_vec(*mob.points.last().unwrap(), anchors[3]));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn proportions_walk_the_curves() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let mob = scene.get(sq).unwrap();
    assert!(approx_vec(mob.point_from_proportion(0.0).unwrap(), ORIGIN));
    assert!(approx_vec(mob.point_from_proportion(0.25).unwrap(), RIGHT));
    assert!(approx_vec(mob.point_from_proportion(0.5).unwrap(), RIGHT + UP));
    assert!(approx_vec(mob.point_from_proportion(1.0).unwrap(), ORIGIN));
}

#[test]
fn proportion_of_nothing_is_an_error() {
    let mob = Mobject::vmobject(WHITE);
    assert!(matches!(mob.point_from_proportion(0.5), Err(KinemaError::NoPoints(_))));
}

#[test]
fn perimeter_of_the_unit_square() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let length = scene.get(sq).unwrap().arc_length(None).unwrap();
    assert!((length - 4.0).abs() < 1e-9);
}

#[test]
fn anchors_split_into_starts_and_ends() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let mob = scene.get(sq).unwrap();
    assert_eq!(mob.start_anchors(), vec![ORIGIN, RIGHT, RIGHT + UP, UP]);
    assert_eq!(mob.end_anchors(), vec![RIGHT, RIGHT + UP, UP, ORIGIN]);
    let [a1, _, _, a2] = mob.anchors_and_handles();
    assert_eq!(a1.len(), 4);
    assert_eq!(a2.len(), 4);
}

// ============================================================================
// Partial paths and alignment
// ============================================================================

#[test]
fn half_of_the_square() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let half = scene.get_subcurve(sq, 0.0, 0.5).unwrap();
    let mob = scene.get(half).unwrap();
    // The cut lands on a curve boundary, leaving a degenerate third curve.
    assert_eq!(mob.num_curves(), 3);
    assert!(approx_vec(mob.points[0], ORIGIN));
    assert!(approx_vec(*mob.points.last().unwrap(), RIGHT + UP));
}

#[test]
fn vectorized_alignment_keeps_shapes() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let line = scene.spawn(Mobject::vmobject_corners(&[ORIGIN, RIGHT * 2.0]).unwrap());

    scene.align_points(line, sq).unwrap();
    let aligned = scene.get(line).unwrap();
    assert_eq!(aligned.num_points(), 16);
    assert!(approx_vec(aligned.points[0], ORIGIN));
    assert!(approx_vec(*aligned.points.last().unwrap(), RIGHT * 2.0));
    for point in &aligned.points {
        assert!(point.y.abs() < 1e-9);
    }
}

#[test]
fn become_copies_the_other_shape() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let line = scene.spawn(Mobject::vmobject_corners(&[ORIGIN, RIGHT * 2.0]).unwrap());
    scene.set_fill(sq, &Paint::color(BLUE)).unwrap();

    scene.become_mobject(line, sq).unwrap();
    let mob = scene.get(line).unwrap();
    assert_eq!(mob.points, scene.get(sq).unwrap().points);
    assert_eq!(mob.vectorized().unwrap().fill_color(), BLUE);
}

// ============================================================================
// Anchor modes
// ============================================================================

#[test]
fn smoothing_keeps_anchors() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let before = scene.get(sq).unwrap().start_anchors();

    scene.make_smooth(sq).unwrap();
    assert_eq!(scene.get(sq).unwrap().start_anchors(), before);

    scene.change_anchor_mode(sq, AnchorMode::Jagged).unwrap();
    let mob = scene.get(sq).unwrap();
    // Jagged handles sit a third of the way along each side.
    assert!(approx_vec(mob.points[1], RIGHT / 3.0));
}

// ============================================================================
// Style
// ============================================================================

#[test]
fn stroke_and_background_are_independent() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    scene.set_stroke(sq, &Paint::colors(vec![RED, BLUE]).with_width(2.0)).unwrap();
    scene.set_background_stroke(sq, &Paint::color(WHITE).with_width(6.0)).unwrap();

    let data = scene.get(sq).unwrap().vectorized().unwrap();
    assert_eq!(data.stroke_colors(), vec![RED, BLUE]);
    assert_eq!(data.stroke_width, 2.0);
    assert_eq!(data.background_stroke_colors(), vec![WHITE]);
    assert_eq!(data.background_stroke_width, 6.0);
}

#[test]
fn match_style_copies_fill_and_stroke() {
    let mut scene = Scene::new();
    let source = unit_square(&mut scene);
    let dest = unit_square(&mut scene);
    scene.set_fill(source, &Paint::color(RED)).unwrap();
    scene.set_stroke(source, &Paint::color(BLUE).with_width(7.0)).unwrap();

    scene.match_style(dest, source, true).unwrap();
    let data = scene.get(dest).unwrap().vectorized().unwrap();
    assert_eq!(data.fill_color(), RED);
    assert_eq!(data.stroke_color(), BLUE);
    assert_eq!(data.stroke_width, 7.0);
}

#[test]
fn painting_a_plain_mobject_directly_fails() {
    let mut scene = Scene::new();
    let plain = scene.spawn(Mobject::new());
    assert!(scene.set_fill(plain, &Paint::color(RED).with_family(false)).is_err());
}

// ============================================================================
// Derived mobjects
// ============================================================================

#[test]
fn dashes_follow_the_path() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let dashed = scene.get_dashed(sq, 8, 0.5, None).unwrap();
    let dashes = scene.get(dashed).unwrap().submobjects().to_vec();
    assert_eq!(dashes.len(), 8);
    assert_eq!(scene.get(dashed).unwrap().name, "DashedVMobject");

    let second = scene.get(dashes[2]).unwrap();
    assert!(approx_vec(second.points[0], RIGHT));
}

#[test]
fn point_mobject_stands_in_at_the_center() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let point = scene.get_point_mobject(sq).unwrap();
    assert!(approx_vec(scene.get(point).unwrap().location(), DVec3::new(0.5, 0.5, 0.0)));
    assert!((scene.width(point).unwrap() - 1.0).abs() < 1e-9);
}

// ============================================================================
// Wrapper
// ============================================================================

#[test]
fn chained_edits_apply_in_order() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    scene.mobject(sq).move_to(ORIGIN).scale(2.0).shift(RIGHT).set_color(RED);

    assert!(approx_vec(scene.center(sq).unwrap(), RIGHT));
    assert!((scene.width(sq).unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(scene.get(sq).unwrap().vectorized().unwrap().stroke_color(), RED);
}

#[test]
fn chain_survives_a_failing_step() {
    let mut scene = Scene::new();
    let sq = unit_square(&mut scene);
    let stale = unit_square(&mut scene);
    scene.despawn(stale).unwrap();

    scene.mobject(stale).shift(UP).scale(2.0);
    scene.mobject(sq).shift(UP);
    assert!(approx_vec(scene.get(sq).unwrap().points[0], UP));
}
