//! Vector and rotation helpers on top of `glam`'s double-precision types.

use glam::{DMat3, DQuat, DVec3};

use crate::constants::TAU;
use crate::errors::{KinemaError, Result};

/// Unit vector in the direction of `v`.
///
/// # Errors
/// Returns [`KinemaError::ZeroLengthVector`] when `v` has no length.
pub fn normalize(v: DVec3, context: &'static str) -> Result<DVec3> {
    v.try_normalize().ok_or(KinemaError::ZeroLengthVector(context))
}

/// Unit vector in the direction of `v`, or `fallback` when `v` is zero.
#[inline]
#[must_use]
pub fn normalize_or(v: DVec3, fallback: DVec3) -> DVec3 {
    v.try_normalize().unwrap_or(fallback)
}

#[inline]
#[must_use]
pub fn is_finite(v: DVec3) -> bool {
    v.is_finite()
}

/// Rotation of `angle` radians about `axis`.
pub fn rotation_quat(angle: f64, axis: DVec3) -> Result<DQuat> {
    let axis = normalize(axis, "rotation axis")?;
    Ok(DQuat::from_axis_angle(axis, angle))
}

/// Rotates `v` by `angle` radians about `axis` (right-handed).
pub fn rotate_vector(v: DVec3, angle: f64, axis: DVec3) -> Result<DVec3> {
    Ok(rotation_quat(angle, axis)? * v)
}

/// Matrix form of [`rotate_vector`].
pub fn rotation_matrix(angle: f64, axis: DVec3) -> Result<DMat3> {
    Ok(DMat3::from_quat(rotation_quat(angle, axis)?))
}

#[must_use]
pub fn rotation_about_z(angle: f64) -> DMat3 {
    DMat3::from_rotation_z(angle)
}

/// Angle of the xy projection of `v`, measured from the positive x axis.
#[inline]
#[must_use]
pub fn angle_of_vector(v: DVec3) -> f64 {
    v.y.atan2(v.x)
}

/// Unsigned angle between two vectors.
pub fn angle_between_vectors(a: DVec3, b: DVec3) -> Result<f64> {
    let a = normalize(a, "angle_between_vectors")?;
    let b = normalize(b, "angle_between_vectors")?;
    Ok(a.dot(b).clamp(-1.0, 1.0).acos())
}

/// Intersection of the two infinite lines through `line1` and `line2`,
/// computed in the xy plane.
///
/// # Errors
/// Returns [`KinemaError::ParallelLines`] when the lines never meet.
pub fn line_intersection(line1: [DVec3; 2], line2: [DVec3; 2]) -> Result<DVec3> {
    let det = |a: [f64; 2], b: [f64; 2]| a[0] * b[1] - a[1] * b[0];

    let x_diff = [line1[0].x - line1[1].x, line2[0].x - line2[1].x];
    let y_diff = [line1[0].y - line1[1].y, line2[0].y - line2[1].y];

    let div = det(x_diff, y_diff);
    if div == 0.0 {
        return Err(KinemaError::ParallelLines);
    }

    let d = [
        det([line1[0].x, line1[0].y], [line1[1].x, line1[1].y]),
        det([line2[0].x, line2[0].y], [line2[1].x, line2[1].y]),
    ];
    Ok(DVec3::new(det(d, x_diff) / div, det(d, y_diff) / div, 0.0))
}

/// `num_sides` vectors evenly spread around the z axis, starting at `start`.
#[must_use]
pub fn compass_directions(num_sides: usize, start: DVec3) -> Vec<DVec3> {
    let angle = TAU / num_sides as f64;
    (0..num_sides)
        .map(|k| {
            let (sin, cos) = (angle * k as f64).sin_cos();
            DVec3::new(start.x * cos - start.y * sin, start.x * sin + start.y * cos, 0.0)
        })
        .collect()
}
