//! Bezier curve math.
//!
//! Everything here is a pure function of its inputs. The only state is the
//! binomial coefficient cache behind [`choose`].

use glam::DVec3;

use crate::errors::Result;
use crate::math::binomial::choose;
use crate::math::interpolate::interpolate;
use crate::math::linalg::BandedSystem;

/// Default distance under which the two ends of an anchor run count as the
/// same point.
pub const CLOSED_TOLERANCE: f64 = 1e-6;

/// Evaluates the Bezier curve with control points `points` at `t`, using the
/// Bernstein form. Returns the origin for an empty control polygon.
#[must_use]
pub fn bezier_point(points: &[DVec3], t: f64) -> DVec3 {
    let Some(n) = points.len().checked_sub(1) else {
        return DVec3::ZERO;
    };
    let s = 1.0 - t;
    points
        .iter()
        .enumerate()
        .fold(DVec3::ZERO, |sum, (k, &point)| {
            let coefficient = s.powi((n - k) as i32) * t.powi(k as i32) * choose(n as u32, k as u32);
            sum + point * coefficient
        })
}

/// Curve function over the given control points.
pub fn bezier(points: &[DVec3]) -> impl Fn(f64) -> DVec3 + use<> {
    let points = points.to_vec();
    move |t| bezier_point(&points, t)
}

/// Control points of the portion of the curve traced for `t` in `[a, b]`.
///
/// The curve is first cut at `a`, then the remainder is cut at the
/// reparametrized end `(b - a) / (1 - a)`. For `a == 1` every control
/// point collapses onto the original end point.
#[must_use]
pub fn partial_bezier_points(points: &[DVec3], a: f64, b: f64) -> Vec<DVec3> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };
    if a == 1.0 {
        return vec![last; points.len()];
    }

    let a_to_1: Vec<DVec3> = (0..points.len())
        .map(|i| bezier_point(&points[i..], a))
        .collect();
    let end_prop = (b - a) / (1.0 - a);

    (0..points.len())
        .map(|n| bezier_point(&a_to_1[..=n], end_prop))
        .collect()
}

/// Maps `alpha` in `[0, 1]` onto the bins `start..end`, returning the bin
/// index and the fractional progress inside it.
///
/// Saturates at the boundaries: `alpha <= 0` yields `(start, 0)` and
/// `alpha >= 1` yields `(end - 1, 1)`. An empty range (`end <= start`)
/// stays at `start`.
#[must_use]
pub fn integer_interpolate(start: usize, end: usize, alpha: f64) -> (usize, f64) {
    if alpha >= 1.0 {
        return (end.saturating_sub(1).max(start), 1.0);
    }
    if alpha <= 0.0 {
        return (start, 0.0);
    }
    let span = end.saturating_sub(start);
    if span == 0 {
        return (start, 0.0);
    }
    let value = interpolate(start as f64, end as f64, alpha).floor() as usize;
    let residue = (span as f64 * alpha) % 1.0;
    (value, residue)
}

/// Whether the first and last point coincide within `tolerance`.
#[must_use]
pub fn is_closed(points: &[DVec3], tolerance: f64) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => first.distance_squared(*last) <= tolerance * tolerance,
        _ => false,
    }
}

/// Solves for the handles that make the cubic spline through `anchors`
/// C2-continuous.
///
/// Returns `(first_handles, second_handles)`, one pair per segment. An open
/// run gets natural end conditions (zero second derivative); a closed run
/// (first anchor equal to last) gets continuity across the seam instead.
/// Fewer than two anchors produce no handles.
///
/// # Errors
/// [`crate::errors::KinemaError::SingularMatrix`] if the system has no unique solution,
/// which only happens for degenerate input.
pub fn get_smooth_handle_points(anchors: &[DVec3]) -> Result<(Vec<DVec3>, Vec<DVec3>)> {
    let num_handles = anchors.len().saturating_sub(1);
    if num_handles == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let closed = is_closed(anchors, CLOSED_TOLERANCE);
    if closed && num_handles == 1 {
        // A closed single segment is a point.
        return Ok((vec![anchors[0]], vec![anchors[0]]));
    }

    // Unknowns are interleaved: x[2i] = h1_i, x[2i + 1] = h2_i.
    let dim = 2 * num_handles;
    let mut system = BandedSystem::new(dim);

    if closed {
        // Seam, first derivative: h1_0 + h2_{n-1} = 2 p_0
        system.push(0, 0, 1.0);
        system.push(0, dim - 1, 1.0);
        system.set_rhs(0, anchors[0] * 2.0);
    } else {
        // Start: 2 h1_0 - h2_0 = p_0
        system.push(0, 0, 2.0);
        system.push(0, 1, -1.0);
        system.set_rhs(0, anchors[0]);
    }

    for i in 0..num_handles - 1 {
        // First derivative: h2_i + h1_{i+1} = 2 p_{i+1}
        let r = 2 * i + 1;
        system.push(r, r, 1.0);
        system.push(r, r + 1, 1.0);
        system.set_rhs(r, anchors[i + 1] * 2.0);

        // Second derivative: h1_i - 2 h2_i + 2 h1_{i+1} - h2_{i+1} = 0
        let r = 2 * i + 2;
        system.push(r, r - 2, 1.0);
        system.push(r, r - 1, -2.0);
        system.push(r, r, 2.0);
        system.push(r, r + 1, -1.0);
    }

    if closed {
        // Seam, second derivative: 2 h1_0 - h2_0 + h1_{n-1} - 2 h2_{n-1} = 0
        system.push(dim - 1, 0, 2.0);
        system.push(dim - 1, 1, -1.0);
        system.push(dim - 1, dim - 2, 1.0);
        system.push(dim - 1, dim - 1, -2.0);
    } else {
        // End: -h1_{n-1} + 2 h2_{n-1} = p_n
        system.push(dim - 1, dim - 2, -1.0);
        system.push(dim - 1, dim - 1, 2.0);
        system.set_rhs(dim - 1, anchors[num_handles]);
    }

    let solution = if closed {
        // Folding the segments (0, n-1, 1, n-2, ...) puts the seam next to
        // the diagonal, keeping the cyclic system banded.
        system.solve_permuted(
            |index| 2 * fold(index / 2, num_handles) + index % 2,
            "smooth handle points",
        )?
    } else {
        system.solve_permuted(|index| index, "smooth handle points")?
    };
    let (h1, h2) = solution
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .unzip();
    Ok((h1, h2))
}

/// Position of segment `k` of `n` in the order `0, n-1, 1, n-2, ...`.
#[inline]
fn fold(k: usize, n: usize) -> usize {
    if 2 * k < n {
        2 * k
    } else {
        2 * (n - 1 - k) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic() -> [DVec3; 4] {
        [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(3.0, 2.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn endpoints_are_anchors() {
        let p = cubic();
        assert!((bezier_point(&p, 0.0) - p[0]).length() < 1e-12);
        assert!((bezier_point(&p, 1.0) - p[3]).length() < 1e-12);
    }

    #[test]
    fn partial_at_one_collapses() {
        let p = cubic();
        assert_eq!(partial_bezier_points(&p, 1.0, 1.0), vec![p[3]; 4]);
    }

    #[test]
    fn integer_interpolate_saturates() {
        assert_eq!(integer_interpolate(0, 5, -0.5), (0, 0.0));
        assert_eq!(integer_interpolate(0, 5, 3.0), (4, 1.0));
        let (index, residue) = integer_interpolate(0, 4, 0.6);
        assert_eq!(index, 2);
        assert!((residue - 0.4).abs() < 1e-12);
    }

    #[test]
    fn integer_interpolate_handles_empty_ranges() {
        assert_eq!(integer_interpolate(3, 3, 0.5), (3, 0.0));
        assert_eq!(integer_interpolate(5, 2, 0.5), (5, 0.0));
        assert_eq!(integer_interpolate(5, 2, 1.0), (5, 1.0));
    }

    #[test]
    fn folded_order_is_a_permutation() {
        for n in 1..9 {
            let mut seen: Vec<usize> = (0..n).map(|k| fold(k, n)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn closed_run_is_detected() {
        assert!(is_closed(&[DVec3::X, DVec3::Y, DVec3::X], CLOSED_TOLERANCE));
        assert!(!is_closed(&[DVec3::X, DVec3::Y], CLOSED_TOLERANCE));
        assert!(!is_closed(&[], CLOSED_TOLERANCE));
    }
}
