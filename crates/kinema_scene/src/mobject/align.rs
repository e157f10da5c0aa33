use kinema_core::errors::{KinemaError, Result};
use kinema_core::math::{Color, Interpolatable};
use kinema_core::math::array::{make_even, split_factors};

use crate::MobjectKey;
use crate::mobject::Mobject;
use crate::scene::Scene;
use crate::vmobject::{VMobjectData, VMobjectStyle};

impl Scene {
    // ========================================================================
    // Alignment
    // ========================================================================

    /// Reshapes `a` and `b` so their families pair up one to one with equal
    /// point counts at every position.
    ///
    /// 1. If exactly one root owns points, that root moves its points into a
    ///    new last child.
    /// 2. Child counts are equalized with invisible copies.
    /// 3. Point counts of the roots are equalized.
    /// 4. The children are aligned pairwise, recursively.
    pub fn align_data(&mut self, a: MobjectKey, b: MobjectKey) -> Result<()> {
        self.null_point_align(a, b)?;
        self.align_submobjects(a, b)?;
        self.align_points(a, b)?;
        if self.get(a)?.is_vectorized() && self.get(b)?.is_vectorized() {
            self.align_colors(a, b)?;
        }

        let children_a = self.get(a)?.submobjects.clone();
        let children_b = self.get(b)?.submobjects.clone();
        for (ca, cb) in children_a.into_iter().zip(children_b) {
            self.align_data(ca, cb)?;
        }
        Ok(())
    }

    /// When one root has no points and the other does, the root with points
    /// is demoted into a child copy so both become containers.
    pub fn null_point_align(&mut self, a: MobjectKey, b: MobjectKey) -> Result<()> {
        for (m1, m2) in [(a, b), (b, a)] {
            if !self.get(m1)?.has_points() && self.get(m2)?.has_points() {
                log::debug!("Pushing {} into its own submobjects", self.get(m2)?.name);
                self.push_self_into_submobjects(m2)?;
            }
        }
        Ok(())
    }

    pub fn align_submobjects(&mut self, a: MobjectKey, b: MobjectKey) -> Result<()> {
        let n1 = self.get(a)?.submobjects.len();
        let n2 = self.get(b)?.submobjects.len();
        self.add_n_more_submobjects(a, n2.saturating_sub(n1))?;
        self.add_n_more_submobjects(b, n1.saturating_sub(n2))
    }

    /// Grows the child list by `n` entries.
    ///
    /// Extra entries are copies of existing children faded to full
    /// transparency, spread as evenly as [`split_factors`] allows and placed
    /// right after the child they copy. A childless node gets `n` point
    /// mobjects instead.
    pub fn add_n_more_submobjects(&mut self, key: MobjectKey, n: usize) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        let children = self.get(key)?.submobjects.clone();
        if children.is_empty() {
            let mut points = Vec::with_capacity(n);
            for _ in 0..n {
                points.push(self.get_point_mobject(key)?);
            }
            return self.set_submobjects(key, points);
        }

        let factors = split_factors(children.len(), children.len() + n);
        let mut expanded = Vec::with_capacity(children.len() + n);
        for (&child, &factor) in children.iter().zip(&factors) {
            expanded.push(child);
            for _ in 1..factor {
                let copy = self.copy(child)?;
                self.fade(copy, 1.0, true)?;
                expanded.push(copy);
            }
        }
        log::debug!("{}: padded {} submobjects to {}", self.get(key)?.name, children.len(), expanded.len());
        self.set_submobjects(key, expanded)
    }

    /// Equalizes the point counts of the two roots (not their children).
    pub fn align_points(&mut self, a: MobjectKey, b: MobjectKey) -> Result<()> {
        if self.get(a)?.is_vectorized() && self.get(b)?.is_vectorized() {
            return self.align_vectorized_points(a, b);
        }
        let n1 = self.get(a)?.num_points();
        let n2 = self.get(b)?.num_points();
        if n1 < n2 {
            self.align_points_with_larger(a, b)
        } else if n2 < n1 {
            self.align_points_with_larger(b, a)
        } else {
            Ok(())
        }
    }

    /// Grows `key`'s points to match `larger`. Only vectorized pairs can be
    /// aligned; any other pairing of unequal point clouds is rejected.
    pub fn align_points_with_larger(&mut self, key: MobjectKey, larger: MobjectKey) -> Result<()> {
        if self.get(key)?.is_vectorized() && self.get(larger)?.is_vectorized() {
            return self.align_vectorized_points(key, larger);
        }
        Err(KinemaError::not_implemented(
            "align_points_with_larger",
            self.get(key)?.kind.variant_name(),
        ))
    }

    /// Spawns a stand-in used when a childless node must grow children: a
    /// vectorized point at its center with its color and size.
    pub fn get_point_mobject(&mut self, key: MobjectKey) -> Result<MobjectKey> {
        let mob = self.get(key)?;
        let color = mob.require_vectorized("get_point_mobject")?.fill_color();
        let point = Mobject::vectorized_point(self.center(key)?, color, self.width(key)?, self.height(key)?);
        Ok(self.spawn(point))
    }

    /// Makes `key`'s own points the `[a, b]` portion of `source`'s.
    pub fn pointwise_become_partial(&mut self, key: MobjectKey, source: MobjectKey, a: f64, b: f64) -> Result<()> {
        if !self.get(key)?.is_vectorized() {
            return Err(KinemaError::not_implemented(
                "pointwise_become_partial",
                self.get(key)?.kind.variant_name(),
            ));
        }
        self.pointwise_become_partial_vectorized(key, source, a, b)
    }

    // ========================================================================
    // Interpolation
    // ========================================================================

    /// Sets `key`'s own points, color and style to the blend of `start` and
    /// `end` at `alpha`. The two sources must have equal point counts.
    pub fn interpolate(&mut self, key: MobjectKey, start: MobjectKey, end: MobjectKey, alpha: f64) -> Result<()> {
        let from = self.get(start)?;
        let to = self.get(end)?;
        if from.points.len() != to.points.len() {
            return Err(KinemaError::LengthMismatch {
                context: "interpolate",
                left: from.points.len(),
                right: to.points.len(),
            });
        }
        let points: Vec<_> = from
            .points
            .iter()
            .zip(&to.points)
            .map(|(&p, &q)| Interpolatable::interpolate_linear(p, q, alpha))
            .collect();
        let color = from.color.lerp(to.color, alpha);
        let style = match (from.vectorized(), to.vectorized()) {
            (Some(f), Some(t)) => Some(blend_style(f, t, alpha)),
            _ => None,
        };

        let mob = self.get_mut(key)?;
        mob.points = points;
        mob.color = color;
        if let (Some(data), Some(style)) = (mob.vectorized_mut(), style) {
            data.replace_style(style);
        }
        Ok(())
    }

    /// Aligns `key` with `other`, then copies points, color and style from
    /// `other`'s family onto `key`'s, position by position.
    pub fn become_mobject(&mut self, key: MobjectKey, other: MobjectKey) -> Result<()> {
        self.align_data(key, other)?;
        let own = self.family(key)?;
        let theirs = self.family(other)?;
        if own.len() != theirs.len() {
            return Err(KinemaError::LengthMismatch {
                context: "become",
                left: own.len(),
                right: theirs.len(),
            });
        }
        for (k, source) in own.into_iter().zip(theirs) {
            let from = self.get(source)?;
            let points = from.points.clone();
            let color = from.color;
            let style = from.vectorized().map(VMobjectData::style);
            let mob = self.get_mut(k)?;
            mob.points = points;
            mob.color = color;
            if let (Some(data), Some(style)) = (mob.vectorized_mut(), style) {
                data.replace_style(style);
            }
        }
        Ok(())
    }
}

fn blend_style(from: &VMobjectData, to: &VMobjectData, alpha: f64) -> VMobjectStyle {
    let blend = |a: Vec<Color>, b: Vec<Color>| -> Vec<Color> {
        let (a, b) = make_even(&a, &b);
        a.into_iter().zip(b).map(|(x, y)| x.lerp(y, alpha)).collect()
    };
    VMobjectStyle {
        fill_colors: blend(from.fill_colors(), to.fill_colors()),
        stroke_colors: blend(from.stroke_colors(), to.stroke_colors()),
        stroke_width: f64::interpolate_linear(from.stroke_width, to.stroke_width, alpha),
        background_stroke_colors: blend(from.background_stroke_colors(), to.background_stroke_colors()),
        background_stroke_width: f64::interpolate_linear(
            from.background_stroke_width,
            to.background_stroke_width,
            alpha,
        ),
    }
}
