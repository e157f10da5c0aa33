//! Curve queries, subpath splitting and point-count alignment.

use glam::DVec3;

use kinema_core::constants::POINTS_PER_CURVE;
use kinema_core::errors::{KinemaError, Result};
use kinema_core::math::array::{linspace, split_factors};
use kinema_core::math::bezier::{bezier, integer_interpolate, partial_bezier_points};

use crate::MobjectKey;
use crate::mobject::Mobject;
use crate::scene::Scene;
use crate::vmobject::VMobjectData;
use crate::vmobject::path::points_equal;

/// Groups `points` into full curves, dropping a trailing partial curve.
#[must_use]
pub fn cubic_bezier_tuples(points: &[DVec3]) -> Vec<[DVec3; 4]> {
    points
        .chunks_exact(POINTS_PER_CURVE)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect()
}

/// Raises the curve count of `points` by `n`.
///
/// New curves come from cutting existing ones into equal parameter pieces;
/// curve `i` is cut into `split_factors(current, current + n)[i]` pieces.
/// A lone point becomes `n` degenerate curves sitting on it.
#[must_use]
pub fn insert_n_curves_to_point_list(n: usize, points: &[DVec3]) -> Vec<DVec3> {
    if let [point] = points {
        return vec![*point; POINTS_PER_CURVE * n];
    }
    let quads = cubic_bezier_tuples(points);
    let factors = split_factors(quads.len(), quads.len() + n);

    let mut out = Vec::with_capacity((quads.len() + n) * POINTS_PER_CURVE);
    for (quad, &pieces) in quads.iter().zip(&factors) {
        let alphas = linspace(0.0, 1.0, pieces + 1);
        for window in alphas.windows(2) {
            out.extend(partial_bezier_points(quad, window[0], window[1]));
        }
    }
    out
}

/// Splits `points` wherever the end of one curve does not coincide with the
/// start of the next. Pieces shorter than one curve are dropped.
fn subpaths_from_points(data: &VMobjectData, points: &[DVec3], two_d: bool) -> Vec<Vec<DVec3>> {
    let mut splits = vec![0];
    splits.extend(
        (POINTS_PER_CURVE..points.len())
            .step_by(POINTS_PER_CURVE)
            .filter(|&n| !points_equal(data, points[n - 1], points[n], two_d)),
    );
    splits.push(points.len());

    splits
        .windows(2)
        .filter(|w| w[1] - w[0] >= POINTS_PER_CURVE)
        .map(|w| points[w[0]..w[1]].to_vec())
        .collect()
}

impl Mobject {
    /// Subpaths of this node's own points, compared in 3D.
    #[must_use]
    pub fn subpaths(&self) -> Vec<Vec<DVec3>> {
        self.subpaths_of(&self.points, false)
    }

    /// Subpaths compared on x and y only.
    #[must_use]
    pub fn subpaths_2d(&self) -> Vec<Vec<DVec3>> {
        self.subpaths_of(&self.points, true)
    }

    fn subpaths_of(&self, points: &[DVec3], two_d: bool) -> Vec<Vec<DVec3>> {
        match self.vectorized() {
            Some(data) => subpaths_from_points(data, points, two_d),
            None => subpaths_from_points(&VMobjectData::default(), points, two_d),
        }
    }

    #[must_use]
    pub fn cubic_bezier_tuples(&self) -> Vec<[DVec3; 4]> {
        cubic_bezier_tuples(&self.points)
    }

    #[inline]
    #[must_use]
    pub fn num_curves(&self) -> usize {
        self.points.len() / POINTS_PER_CURVE
    }

    pub fn nth_curve_points(&self, n: usize) -> Result<&[DVec3]> {
        let count = self.num_curves();
        if n >= count {
            return Err(KinemaError::CurveIndexOutOfRange { index: n, count });
        }
        Ok(&self.points[POINTS_PER_CURVE * n..POINTS_PER_CURVE * (n + 1)])
    }

    pub fn nth_curve_function(&self, n: usize) -> Result<impl Fn(f64) -> DVec3 + use<>> {
        Ok(bezier(self.nth_curve_points(n)?))
    }

    /// Point at `alpha` of the way along the curve sequence, each curve
    /// taking an equal share of the parameter range.
    pub fn point_from_proportion(&self, alpha: f64) -> Result<DVec3> {
        let curves = self.num_curves();
        if curves == 0 {
            return Err(KinemaError::NoPoints("point_from_proportion"));
        }
        let (n, residue) = integer_interpolate(0, curves, alpha);
        Ok(self.nth_curve_function(n)?(residue))
    }

    /// Every fourth point starting at offset `n`.
    fn every_nth_point(&self, n: usize) -> Vec<DVec3> {
        self.points.iter().skip(n).step_by(POINTS_PER_CURVE).copied().collect()
    }

    /// `[first anchors, first handles, second handles, second anchors]`.
    #[must_use]
    pub fn anchors_and_handles(&self) -> [Vec<DVec3>; 4] {
        std::array::from_fn(|i| self.every_nth_point(i))
    }

    #[must_use]
    pub fn start_anchors(&self) -> Vec<DVec3> {
        self.every_nth_point(0)
    }

    #[must_use]
    pub fn end_anchors(&self) -> Vec<DVec3> {
        self.every_nth_point(POINTS_PER_CURVE - 1)
    }

    /// Start anchors followed by end anchors; a lone point is its own anchor.
    #[must_use]
    pub fn anchors(&self) -> Vec<DVec3> {
        if self.points.len() == 1 {
            return self.points.clone();
        }
        let mut anchors = self.start_anchors();
        anchors.extend(self.end_anchors());
        anchors
    }

    /// Polyline length through `samples` evenly spaced proportions
    /// (default `4 * curves + 1`).
    pub fn arc_length(&self, samples: Option<usize>) -> Result<f64> {
        let samples = samples.unwrap_or(POINTS_PER_CURVE * self.num_curves() + 1);
        let points = linspace(0.0, 1.0, samples)
            .into_iter()
            .map(|alpha| self.point_from_proportion(alpha))
            .collect::<Result<Vec<_>>>()?;
        Ok(points.windows(2).map(|w| w[0].distance(w[1])).sum())
    }

    /// Adds `n` curves in place, keeping a pending point pending.
    pub fn insert_n_curves(&mut self, n: usize) -> Result<()> {
        self.require_vectorized("insert_n_curves")?;
        let pending = if self.has_new_path_started() { self.last_point() } else { None };
        self.points = insert_n_curves_to_point_list(n, &self.points);
        self.points.extend(pending);
        Ok(())
    }

    /// Replaces this node's points with the part of `source` (a flat curve
    /// run) covering the parameter range `[a, b]`.
    ///
    /// Whole curves strictly inside the range are copied; the boundary
    /// curves are cut with [`partial_bezier_points`]. `a <= 0` and `b >= 1`
    /// copy the source unchanged, as does a source without a full curve.
    pub fn become_partial_points(&mut self, source: &[DVec3], a: f64, b: f64) -> Result<()> {
        self.require_vectorized("pointwise_become_partial")?;
        if a <= 0.0 && b >= 1.0 {
            self.points = source.to_vec();
            return Ok(());
        }
        let quads = cubic_bezier_tuples(source);
        if quads.is_empty() {
            self.points = source.to_vec();
            return Ok(());
        }

        let (lower_index, lower_residue) = integer_interpolate(0, quads.len(), a);
        let (upper_index, upper_residue) = integer_interpolate(0, quads.len(), b);

        if lower_index == upper_index {
            self.points = partial_bezier_points(&quads[lower_index], lower_residue, upper_residue);
        } else {
            self.points = partial_bezier_points(&quads[lower_index], lower_residue, 1.0);
            for quad in quads.iter().take(upper_index).skip(lower_index + 1) {
                self.points.extend_from_slice(quad);
            }
            self.points.extend(partial_bezier_points(&quads[upper_index], 0.0, upper_residue));
        }
        Ok(())
    }
}

impl Scene {
    /// Equalizes the point counts of two vectorized nodes without changing
    /// their shapes.
    ///
    /// An empty node first gets a start point at its center, and a pending
    /// point is closed off with a zero-length line. The side with fewer
    /// subpaths is padded with degenerate subpaths sitting on its last
    /// point, then each subpath pair is brought to the same curve count.
    pub fn align_vectorized_points(&mut self, a: MobjectKey, b: MobjectKey) -> Result<()> {
        if self.get(a)?.num_points() == self.get(b)?.num_points() {
            return Ok(());
        }
        for key in [a, b] {
            if !self.get(key)?.has_points() {
                let center = self.center(key)?;
                self.get_mut(key)?.start_new_path(center)?;
            }
            let mob = self.get_mut(key)?;
            if mob.has_new_path_started() {
                let last = mob.last_point().ok_or(KinemaError::EmptyPath("align points"))?;
                mob.add_line_to(last)?;
            }
        }

        let subpaths1 = self.get(a)?.subpaths();
        let subpaths2 = self.get(b)?.subpaths();
        let count = subpaths1.len().max(subpaths2.len());
        log::debug!("Aligning {} and {} subpaths", subpaths1.len(), subpaths2.len());

        let mut path1 = Vec::new();
        let mut path2 = Vec::new();
        for n in 0..count {
            let sp1 = nth_subpath(&subpaths1, n);
            let sp2 = nth_subpath(&subpaths2, n);
            let diff1 = sp2.len().saturating_sub(sp1.len()) / POINTS_PER_CURVE;
            let diff2 = sp1.len().saturating_sub(sp2.len()) / POINTS_PER_CURVE;
            path1.extend(insert_n_curves_to_point_list(diff1, &sp1));
            path2.extend(insert_n_curves_to_point_list(diff2, &sp2));
        }

        self.get_mut(a)?.points = path1;
        self.get_mut(b)?.points = path2;
        Ok(())
    }

    /// Makes `key` the `[a, b]` portion of `source`'s path.
    pub fn pointwise_become_partial_vectorized(&mut self, key: MobjectKey, source: MobjectKey, a: f64, b: f64) -> Result<()> {
        let points = self.get(source)?.points.clone();
        self.get_mut(key)?.become_partial_points(&points, a, b)
    }
}

/// Subpath `n`, or a degenerate curve on the very last point when the list
/// is shorter.
fn nth_subpath(subpaths: &[Vec<DVec3>], n: usize) -> Vec<DVec3> {
    if let Some(subpath) = subpaths.get(n) {
        return subpath.clone();
    }
    let last = subpaths
        .last()
        .and_then(|sp| sp.last())
        .copied()
        .unwrap_or(DVec3::ZERO);
    vec![last; POINTS_PER_CURVE]
}
