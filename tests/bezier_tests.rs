//! Bezier Math Tests
//!
//! Tests for:
//! - Linear interpolation of vectors
//! - Curve splitting with partial_bezier_points
//! - integer_interpolate bin mapping
//! - Smooth handle generation

use glam::DVec3;

use kinema::core::math::bezier::{bezier_point, get_smooth_handle_points, integer_interpolate, partial_bezier_points};
use kinema::core::math::{Interpolatable, interpolate};

const EPSILON: f64 = 1e-9;

fn approx_vec(a: DVec3, b: DVec3) -> bool {
    a.abs_diff_eq(b, 1e-7)
}

fn cubic() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
        DVec3::new(3.0, -1.0, 0.5),
        DVec3::new(4.0, 1.0, 0.0),
    ]
}

// ============================================================================
// Lerp
// ============================================================================

#[test]
fn lerp_hits_endpoints() {
    let a = DVec3::new(1.0, -2.0, 3.0);
    let b = DVec3::new(-4.0, 5.0, 0.5);
    assert!(approx_vec(DVec3::interpolate_linear(a, b, 0.0), a));
    assert!(approx_vec(DVec3::interpolate_linear(a, b, 1.0), b));
}

#[test]
fn lerp_is_affine_in_alpha() {
    let a = DVec3::new(1.0, -2.0, 3.0);
    let b = DVec3::new(-4.0, 5.0, 0.5);
    for alpha in [0.1, 0.25, 0.5, 0.9] {
        let expected = a + (b - a) * alpha;
        assert!(approx_vec(interpolate(a, b, alpha), expected));
    }
}

// ============================================================================
// Curve splitting
// ============================================================================

#[test]
fn split_halves_reproduce_curve() {
    let points = cubic();
    for alpha in [0.2, 0.5, 0.75] {
        let first = partial_bezier_points(&points, 0.0, alpha);
        let second = partial_bezier_points(&points, alpha, 1.0);

        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert!(approx_vec(bezier_point(&first, t), bezier_point(&points, t * alpha)));
            assert!(approx_vec(
                bezier_point(&second, t),
                bezier_point(&points, alpha + t * (1.0 - alpha))
            ));
        }
        // The halves meet.
        assert!(approx_vec(first[3], second[0]));
    }
}

#[test]
fn partial_from_one_collapses_to_end() {
    let points = cubic();
    let partial = partial_bezier_points(&points, 1.0, 1.0);
    assert!(partial.iter().all(|&p| approx_vec(p, points[3])));
}

// ============================================================================
// integer_interpolate
// ============================================================================

#[test]
fn integer_interpolate_bins() {
    assert_eq!(integer_interpolate(0, 5, 0.0), (0, 0.0));
    assert_eq!(integer_interpolate(0, 5, 1.0), (4, 1.0));
    let (index, residue) = integer_interpolate(0, 5, 0.5);
    assert_eq!(index, 2);
    assert!((residue - 0.5).abs() < EPSILON);
}

#[test]
fn integer_interpolate_saturates_outside_unit_range() {
    assert_eq!(integer_interpolate(0, 3, -0.5), (0, 0.0));
    assert_eq!(integer_interpolate(0, 3, 1.5), (2, 1.0));
}

// ============================================================================
// Smooth handles
// ============================================================================

#[test]
fn single_segment_handles_lie_on_the_line() {
    let a = DVec3::new(0.0, 0.0, 0.0);
    let b = DVec3::new(3.0, 0.0, 0.0);
    let (h1, h2) = get_smooth_handle_points(&[a, b]).unwrap();
    assert_eq!((h1.len(), h2.len()), (1, 1));

    let curve = [a, h1[0], h2[0], b];
    for i in 0..=8 {
        let p = bezier_point(&curve, f64::from(i) / 8.0);
        assert!(p.y.abs() < EPSILON && p.z.abs() < EPSILON);
        assert!((0.0..=3.0).contains(&p.x));
    }
}

#[test]
fn smooth_handles_are_continuous_at_anchors() {
    let anchors = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(3.0, 1.0, 0.0),
    ];
    let (h1, h2) = get_smooth_handle_points(&anchors).unwrap();
    for i in 0..h1.len() - 1 {
        // Incoming and outgoing handles mirror about the shared anchor.
        assert!(approx_vec(h2[i] + h1[i + 1], anchors[i + 1] * 2.0));
    }
}

#[test]
fn closed_loop_handles_wrap_around_the_seam() {
    let anchors = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 0.0),
    ];
    let (h1, h2) = get_smooth_handle_points(&anchors).unwrap();
    let n = h1.len();
    assert_eq!(n, 4);

    // The last segment flows into the first one through the shared anchor.
    assert!(approx_vec(h2[n - 1] + h1[0], anchors[0] * 2.0));
    assert!(approx_vec(h1[0] * 2.0 - h2[0] + h1[n - 1] - h2[n - 1] * 2.0, DVec3::ZERO));
    for i in 0..n - 1 {
        assert!(approx_vec(h2[i] + h1[i + 1], anchors[i + 1] * 2.0));
        assert!(approx_vec(h1[i] - h2[i] * 2.0 + h1[i + 1] * 2.0 - h2[i + 1], DVec3::ZERO));
    }

    // A square loop smooths into a shape symmetric about its center.
    let center = DVec3::new(0.5, 0.5, 0.0);
    let spread = (h1[0] - center).length();
    for handle in h1.iter().chain(h2.iter()) {
        assert!(((*handle - center).length() - spread).abs() < 1e-7);
    }
}

#[test]
fn long_runs_solve_in_a_narrow_band() {
    let anchors: Vec<DVec3> = (0..4000)
        .map(|i| DVec3::new(f64::from(i), f64::from(i % 3), 0.0))
        .collect();
    let (h1, h2) = get_smooth_handle_points(&anchors).unwrap();
    assert_eq!(h1.len(), anchors.len() - 1);
    for i in 0..h1.len() - 1 {
        assert!(approx_vec(h2[i] + h1[i + 1], anchors[i + 1] * 2.0));
    }

    let mut ring = anchors[..1000].to_vec();
    ring.push(anchors[0]);
    let (h1, h2) = get_smooth_handle_points(&ring).unwrap();
    let n = h1.len();
    assert!(approx_vec(h2[n - 1] + h1[0], ring[0] * 2.0));
}

#[test]
fn too_few_anchors_give_no_handles() {
    let (h1, h2) = get_smooth_handle_points(&[DVec3::ONE]).unwrap();
    assert!(h1.is_empty() && h2.is_empty());
}
