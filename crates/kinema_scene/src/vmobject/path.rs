//! Path construction on a single vectorized node.

use glam::DVec3;

use kinema_core::constants::{PI, POINTS_PER_CURVE};
use kinema_core::errors::{KinemaError, Result};
use kinema_core::math::array::linspace;
use kinema_core::math::bezier::get_smooth_handle_points;
use kinema_core::math::interpolate::interpolate;
use kinema_core::math::space_ops::rotate_vector;

use crate::MobjectKey;
use crate::mobject::Mobject;
use crate::scene::Scene;

/// How handles are rebuilt by [`Mobject::change_anchor_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Handles solved for a C2 spline through the anchors.
    Smooth,
    /// Handles at one and two thirds of each segment, giving straight lines.
    Jagged,
}

/// `from`, the two handles of a straight segment, and `to`.
fn straight_segment(from: DVec3, to: DVec3) -> Vec<DVec3> {
    linspace(0.0, 1.0, POINTS_PER_CURVE)
        .into_iter()
        .map(|alpha| interpolate(from, to, alpha))
        .collect()
}

impl Mobject {
    /// Whether the last point is a pending start of a new curve.
    #[inline]
    #[must_use]
    pub fn has_new_path_started(&self) -> bool {
        self.points.len() % POINTS_PER_CURVE == 1
    }

    #[inline]
    #[must_use]
    pub fn last_point(&self) -> Option<DVec3> {
        self.points.last().copied()
    }

    fn last_point_for(&self, operation: &'static str) -> Result<DVec3> {
        self.last_point().ok_or(KinemaError::EmptyPath(operation))
    }

    pub fn start_new_path(&mut self, point: DVec3) -> Result<()> {
        self.require_vectorized("start_new_path")?;
        self.points.push(point);
        Ok(())
    }

    pub fn add_cubic_bezier_curve(&mut self, anchor1: DVec3, handle1: DVec3, handle2: DVec3, anchor2: DVec3) -> Result<()> {
        self.require_vectorized("add_cubic_bezier_curve")?;
        self.points.extend([anchor1, handle1, handle2, anchor2]);
        Ok(())
    }

    /// Adds a curve starting at the last point.
    ///
    /// A pending point is used as the first anchor as is; otherwise the end
    /// of the previous curve is repeated.
    pub fn add_cubic_bezier_curve_to(&mut self, handle1: DVec3, handle2: DVec3, anchor: DVec3) -> Result<()> {
        self.require_vectorized("add_cubic_bezier_curve_to")?;
        let last = self.last_point_for("add cubic bezier curve")?;
        if !self.has_new_path_started() {
            self.points.push(last);
        }
        self.points.extend([handle1, handle2, anchor]);
        Ok(())
    }

    pub fn add_line_to(&mut self, point: DVec3) -> Result<()> {
        let last = self.last_point_for("add line")?;
        let segment = straight_segment(last, point);
        self.add_cubic_bezier_curve_to(segment[1], segment[2], segment[3])
    }

    /// Adds a curve to `anchor` continuing the tangent of the previous one.
    ///
    /// Without an explicit `handle2`, the incoming tangent is mirrored about
    /// the chord to the new anchor. Right after [`Mobject::start_new_path`]
    /// there is no tangent yet and a straight line is drawn instead.
    pub fn add_smooth_curve_to(&mut self, anchor: DVec3, handle2: Option<DVec3>) -> Result<()> {
        if self.has_new_path_started() {
            return self.add_line_to(anchor);
        }
        let n = self.points.len();
        if n < 2 {
            return Err(KinemaError::EmptyPath("add smooth curve"));
        }
        let last_h2 = self.points[n - 2];
        let last_a2 = self.points[n - 1];
        let last_tangent = last_a2 - last_h2;
        let handle1 = last_a2 + last_tangent;

        let handle2 = match handle2 {
            Some(handle) => handle,
            None => {
                let tangent = rotate_vector(last_tangent, PI, anchor - last_a2)?;
                anchor - tangent
            }
        };
        self.add_cubic_bezier_curve_to(handle1, handle2, anchor)
    }

    /// Quadratic curve from the last point, elevated to a cubic.
    pub fn add_quadratic_bezier_curve_to(&mut self, handle: DVec3, anchor: DVec3) -> Result<()> {
        let last = self.last_point_for("add quadratic bezier curve")?;
        self.add_cubic_bezier_curve_to(
            handle * (2.0 / 3.0) + last * (1.0 / 3.0),
            handle * (2.0 / 3.0) + anchor * (1.0 / 3.0),
            anchor,
        )
    }

    /// Whether the first and last point coincide within the node's tolerance.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last(), self.vectorized()) {
            (Some(&first), Some(&last), Some(data)) => points_equal(data, first, last, false),
            _ => false,
        }
    }

    /// Draws a line back to the start of the first subpath unless the path
    /// already ends there.
    pub fn close_path(&mut self) -> Result<()> {
        let first = self
            .points
            .first()
            .copied()
            .ok_or(KinemaError::EmptyPath("close path"))?;
        if !self.is_closed() {
            self.add_line_to(first)?;
        }
        Ok(())
    }

    pub fn add_points_as_corners(&mut self, points: &[DVec3]) -> Result<()> {
        for &point in points {
            self.add_line_to(point)?;
        }
        Ok(())
    }

    /// Replaces the points with straight segments between consecutive
    /// `corners`. Fewer than two corners leave the path empty.
    pub fn set_points_as_corners(&mut self, corners: &[DVec3]) -> Result<()> {
        self.require_vectorized("set_points_as_corners")?;
        self.points = corners
            .windows(2)
            .flat_map(|pair| straight_segment(pair[0], pair[1]))
            .collect();
        Ok(())
    }

    /// Corners through `points`, then smoothed.
    pub fn set_points_smoothly(&mut self, points: &[DVec3]) -> Result<()> {
        self.set_points_as_corners(points)?;
        self.change_anchor_mode(AnchorMode::Smooth)
    }

    /// Rebuilds the points from per-curve columns.
    ///
    /// Curve `i` is `(anchors1[i], handles1[i], handles2[i], anchors2[i])`;
    /// shorter columns are cycled. The curve count is `anchors1.len()`.
    pub fn set_anchors_and_handles(
        &mut self,
        anchors1: &[DVec3],
        handles1: &[DVec3],
        handles2: &[DVec3],
        anchors2: &[DVec3],
    ) -> Result<()> {
        self.require_vectorized("set_anchors_and_handles")?;
        let columns = [anchors1, handles1, handles2, anchors2];
        if !anchors1.is_empty() {
            for column in &columns[1..] {
                if column.is_empty() {
                    return Err(KinemaError::LengthMismatch {
                        context: "set_anchors_and_handles",
                        left: anchors1.len(),
                        right: 0,
                    });
                }
            }
        }
        self.points = (0..anchors1.len() * POINTS_PER_CURVE)
            .map(|j| {
                let column = columns[j % POINTS_PER_CURVE];
                column[(j / POINTS_PER_CURVE) % column.len()]
            })
            .collect();
        Ok(())
    }

    /// Appends a run of points as is.
    pub fn add_subpath(&mut self, points: &[DVec3]) -> Result<()> {
        self.require_vectorized("add_subpath")?;
        self.points.extend_from_slice(points);
        Ok(())
    }

    /// Appends the points of `other`, dropping a pending point first.
    pub fn append_vectorized_mobject(&mut self, other: &Mobject) -> Result<()> {
        self.require_vectorized("append_vectorized_mobject")?;
        if self.has_new_path_started() {
            self.points.pop();
        }
        self.points.extend_from_slice(&other.points);
        Ok(())
    }

    /// Recomputes every handle of this node, subpath by subpath, keeping the
    /// anchors.
    pub fn change_anchor_mode(&mut self, mode: AnchorMode) -> Result<()> {
        self.require_vectorized("change_anchor_mode")?;
        let subpaths = self.subpaths();
        let mut points = Vec::with_capacity(self.points.len());

        for subpath in subpaths {
            let mut anchors: Vec<DVec3> = subpath.iter().step_by(POINTS_PER_CURVE).copied().collect();
            anchors.extend(subpath.last().copied());

            let (h1, h2) = match mode {
                AnchorMode::Smooth => get_smooth_handle_points(&anchors)?,
                AnchorMode::Jagged => anchors
                    .windows(2)
                    .map(|pair| {
                        (
                            interpolate(pair[0], pair[1], 1.0 / 3.0),
                            interpolate(pair[0], pair[1], 2.0 / 3.0),
                        )
                    })
                    .unzip(),
            };

            points.extend(subpath.iter().enumerate().map(|(i, &point)| {
                let curve = i / POINTS_PER_CURVE;
                match i % POINTS_PER_CURVE {
                    1 => h1.get(curve).copied().unwrap_or(point),
                    2 => h2.get(curve).copied().unwrap_or(point),
                    _ => point,
                }
            }));
        }
        self.points = points;
        Ok(())
    }

    /// Moves every handle toward (factor < 1) or away from its anchor.
    /// Nodes with less than one full curve are left alone.
    pub fn scale_handles_to_anchors(&mut self, factor: f64) -> Result<()> {
        self.require_vectorized("scale_handle_to_anchor_distances")?;
        if self.points.len() < POINTS_PER_CURVE {
            return Ok(());
        }
        for curve in self.points.chunks_exact_mut(POINTS_PER_CURVE) {
            curve[1] = curve[0] + (curve[1] - curve[0]) * factor;
            curve[2] = curve[3] + (curve[2] - curve[3]) * factor;
        }
        Ok(())
    }
}

/// Coordinate-wise point equality under the node's tolerance, optionally
/// ignoring z.
pub(crate) fn points_equal(data: &crate::VMobjectData, a: DVec3, b: DVec3, two_d: bool) -> bool {
    let tol = &data.point_tolerance;
    tol.close(a.x, b.x) && tol.close(a.y, b.y) && (two_d || tol.close(a.z, b.z))
}

impl Scene {
    /// Applies [`Mobject::change_anchor_mode`] to every vectorized family
    /// member.
    pub fn change_anchor_mode(&mut self, key: MobjectKey, mode: AnchorMode) -> Result<()> {
        for k in self.vectorized_family(key)? {
            self.get_mut(k)?.change_anchor_mode(mode)?;
        }
        Ok(())
    }

    pub fn make_smooth(&mut self, key: MobjectKey) -> Result<()> {
        self.change_anchor_mode(key, AnchorMode::Smooth)
    }

    pub fn make_jagged(&mut self, key: MobjectKey) -> Result<()> {
        self.change_anchor_mode(key, AnchorMode::Jagged)
    }

    /// Applies [`Mobject::scale_handles_to_anchors`] to every vectorized
    /// family member.
    pub fn scale_handle_to_anchor_distances(&mut self, key: MobjectKey, factor: f64) -> Result<()> {
        for k in self.vectorized_family(key)? {
            self.get_mut(k)?.scale_handles_to_anchors(factor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::constants::{RIGHT, UP, WHITE};

    fn vmob() -> Mobject {
        Mobject::vmobject(WHITE)
    }

    #[test]
    fn line_to_needs_a_start() {
        let mut mob = vmob();
        assert_eq!(mob.add_line_to(RIGHT), Err(KinemaError::EmptyPath("add line")));
    }

    #[test]
    fn line_from_pending_point_adds_three() {
        let mut mob = vmob();
        mob.start_new_path(DVec3::ZERO).unwrap();
        mob.add_line_to(RIGHT * 3.0).unwrap();
        assert_eq!(mob.points, vec![DVec3::ZERO, RIGHT, RIGHT * 2.0, RIGHT * 3.0]);

        mob.add_line_to(RIGHT * 3.0 + UP * 3.0).unwrap();
        assert_eq!(mob.points.len(), 8);
        assert_eq!(mob.points[4], RIGHT * 3.0);
    }

    #[test]
    fn quadratic_is_elevated() {
        let mut mob = vmob();
        mob.start_new_path(DVec3::ZERO).unwrap();
        mob.add_quadratic_bezier_curve_to(UP * 3.0, RIGHT * 3.0).unwrap();
        assert!(mob.points[1].abs_diff_eq(UP * 2.0, 1e-12));
        assert!(mob.points[2].abs_diff_eq(UP * 2.0 + RIGHT, 1e-12));
    }

    #[test]
    fn close_path_returns_to_start() {
        let mut mob = vmob();
        mob.set_points_as_corners(&[DVec3::ZERO, RIGHT, RIGHT + UP]).unwrap();
        assert!(!mob.is_closed());
        mob.close_path().unwrap();
        assert!(mob.is_closed());
        assert_eq!(mob.points.len(), 12);
    }

    #[test]
    fn plain_node_rejects_path_building() {
        let mut mob = Mobject::new();
        assert!(matches!(
            mob.start_new_path(DVec3::ZERO),
            Err(KinemaError::NotImplemented { .. })
        ));
    }

    #[test]
    fn jagged_restores_straight_handles() {
        let mut mob = vmob();
        mob.set_points_smoothly(&[DVec3::ZERO, RIGHT, RIGHT + UP]).unwrap();
        mob.change_anchor_mode(AnchorMode::Jagged).unwrap();
        assert!(mob.points[1].abs_diff_eq(RIGHT / 3.0, 1e-12));
        assert!(mob.points[6].abs_diff_eq(RIGHT + UP * (2.0 / 3.0), 1e-12));
    }

    #[test]
    fn handle_scaling_is_reversible() {
        let mut mob = vmob();
        mob.set_points_smoothly(&[DVec3::ZERO, RIGHT, RIGHT + UP]).unwrap();
        let before = mob.points.clone();
        mob.scale_handles_to_anchors(0.01).unwrap();
        mob.scale_handles_to_anchors(100.0).unwrap();
        for (a, b) in before.iter().zip(&mob.points) {
            assert!(a.abs_diff_eq(*b, 1e-9));
        }
    }
}
