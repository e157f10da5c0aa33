use glam::DVec3;

use kinema_core::constants::{DOWN, LEFT, ORIGIN, OUT, RIGHT, UP};
use kinema_core::errors::Result;
use kinema_core::math::Color;
use kinema_core::math::space_ops::rotation_matrix;

use crate::MobjectKey;
use crate::mobject::MobjectKind;
use crate::scene::Scene;
use crate::vmobject::Paint;

/// Default slack used by [`Scene::is_inside`].
pub const INSIDE_BUFFER: f64 = 0.001;

/// Sign of a direction component, with zero mapping to zero.
fn direction_key(component: f64) -> i8 {
    if component > 0.0 {
        1
    } else if component < 0.0 {
        -1
    } else {
        0
    }
}

fn extremum_along(points: &[DVec3], dim: usize, key: i8) -> f64 {
    let values = points.iter().map(|p| p[dim]);
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    match key {
        k if k < 0 => min,
        0 => (min + max) / 2.0,
        _ => max,
    }
}

impl Scene {
    // ========================================================================
    // Bounding queries
    // ========================================================================

    /// Points that delimit the mobject's extent: anchors for vectorized
    /// mobjects, every point otherwise.
    pub fn points_defining_boundary(&self, key: MobjectKey) -> Result<Vec<DVec3>> {
        if !self.get(key)?.is_vectorized() {
            return self.all_points(key);
        }
        Ok(self
            .vectorized_family(key)?
            .into_iter()
            .filter_map(|k| self.mobjects.get(k))
            .flat_map(|m| m.anchors())
            .collect())
    }

    /// Per axis: the minimum for a negative direction component, the maximum
    /// for a positive one and the midpoint for zero. The origin when the
    /// family has no points.
    pub fn critical_point(&self, key: MobjectKey, direction: DVec3) -> Result<DVec3> {
        let points = self.points_defining_boundary(key)?;
        if points.is_empty() {
            return Ok(ORIGIN);
        }
        Ok(DVec3::new(
            extremum_along(&points, 0, direction_key(direction.x)),
            extremum_along(&points, 1, direction_key(direction.y)),
            extremum_along(&points, 2, direction_key(direction.z)),
        ))
    }

    pub fn edge_center(&self, key: MobjectKey, edge: DVec3) -> Result<DVec3> {
        self.critical_point(key, edge)
    }

    pub fn center(&self, key: MobjectKey) -> Result<DVec3> {
        self.critical_point(key, ORIGIN)
    }

    pub fn left(&self, key: MobjectKey) -> Result<DVec3> {
        self.edge_center(key, LEFT)
    }

    pub fn right(&self, key: MobjectKey) -> Result<DVec3> {
        self.edge_center(key, RIGHT)
    }

    pub fn top(&self, key: MobjectKey) -> Result<DVec3> {
        self.edge_center(key, UP)
    }

    pub fn bottom(&self, key: MobjectKey) -> Result<DVec3> {
        self.edge_center(key, DOWN)
    }

    pub fn width(&self, key: MobjectKey) -> Result<f64> {
        if let MobjectKind::VectorizedPoint { artificial_width, .. } = self.get(key)?.kind {
            return Ok(artificial_width);
        }
        Ok(self.right(key)?.x - self.left(key)?.x)
    }

    pub fn height(&self, key: MobjectKey) -> Result<f64> {
        if let MobjectKind::VectorizedPoint { artificial_height, .. } = self.get(key)?.kind {
            return Ok(artificial_height);
        }
        Ok(self.top(key)?.y - self.bottom(key)?.y)
    }

    /// Whether `point` lies in the xy bounding box grown by `buff`.
    pub fn is_inside(&self, key: MobjectKey, point: DVec3, buff: f64) -> Result<bool> {
        Ok(point.x >= self.left(key)?.x - buff
            && point.x <= self.right(key)?.x + buff
            && point.y >= self.bottom(key)?.y - buff
            && point.y <= self.top(key)?.y + buff)
    }

    // ========================================================================
    // Point transforms
    // ========================================================================

    /// Applies `func` to every point of every family member with points,
    /// relative to a pivot: `about_point` if given, else the critical point
    /// along `about_edge`.
    pub fn apply_over_points(
        &mut self,
        key: MobjectKey,
        func: impl Fn(DVec3) -> DVec3,
        about_point: Option<DVec3>,
        about_edge: DVec3,
    ) -> Result<()> {
        let pivot = match about_point {
            Some(point) => point,
            None => self.critical_point(key, about_edge)?,
        };
        self.apply_to_family(key, true, |mob| {
            for point in &mut mob.points {
                *point = func(*point - pivot) + pivot;
            }
        })
    }

    pub fn shift(&mut self, key: MobjectKey, delta: DVec3) -> Result<()> {
        self.apply_over_points(key, |p| p + delta, Some(ORIGIN), ORIGIN)
    }

    /// Per-axis scale about a pivot (see [`Scene::apply_over_points`]).
    pub fn scale(&mut self, key: MobjectKey, factor: DVec3, about_point: Option<DVec3>, about_edge: DVec3) -> Result<()> {
        self.apply_over_points(key, |p| p * factor, about_point, about_edge)
    }

    pub fn scale_uniformly(&mut self, key: MobjectKey, factor: f64, about_point: Option<DVec3>, about_edge: DVec3) -> Result<()> {
        self.apply_over_points(key, |p| p * factor, about_point, about_edge)
    }

    /// Rotates by `angle` radians about `axis` through a pivot.
    pub fn rotate(
        &mut self,
        key: MobjectKey,
        angle: f64,
        axis: DVec3,
        about_point: Option<DVec3>,
        about_edge: DVec3,
    ) -> Result<()> {
        let matrix = rotation_matrix(angle, axis)?;
        self.apply_over_points(key, |p| matrix * p, about_point, about_edge)
    }

    /// Rotation about the z axis through the center.
    pub fn rotate_about_center(&mut self, key: MobjectKey, angle: f64) -> Result<()> {
        self.rotate(key, angle, OUT, None, ORIGIN)
    }

    /// Maps every point through `func` in absolute coordinates.
    ///
    /// Vectorized mobjects first pull their handles close to the anchors so
    /// that curves bend with the function, then restore the handle lengths
    /// afterwards, and re-smooth when configured to.
    pub fn apply_function(&mut self, key: MobjectKey, func: impl Fn(DVec3) -> DVec3) -> Result<()> {
        let Some(data) = self.get(key)?.vectorized() else {
            return self.apply_over_points(key, func, Some(ORIGIN), ORIGIN);
        };
        let factor = data.pre_function_handle_to_anchor_scale_factor;
        let smooth_after = data.make_smooth_after_applying_functions;

        self.scale_handle_to_anchor_distances(key, factor)?;
        self.apply_over_points(key, func, Some(ORIGIN), ORIGIN)?;
        self.scale_handle_to_anchor_distances(key, 1.0 / factor)?;
        if smooth_after {
            self.make_smooth(key)?;
        }
        Ok(())
    }

    // ========================================================================
    // Color
    // ========================================================================

    /// Sets the base color and, for vectorized members, fill and stroke.
    pub fn set_color(&mut self, key: MobjectKey, color: Color, family: bool) -> Result<()> {
        if family || self.get(key)?.is_vectorized() {
            let paint = Paint::color(color).with_family(family);
            self.set_fill(key, &paint)?;
            self.set_stroke(key, &paint)?;
        }
        let members = if family { self.family(key)? } else { vec![key] };
        for k in members {
            if let Some(mob) = self.mobjects.get_mut(k) {
                mob.color = color;
            }
        }
        Ok(())
    }

    /// Scales every alpha by `1 - darkness`; `darkness = 1` makes the
    /// mobject invisible.
    pub fn fade(&mut self, key: MobjectKey, darkness: f64, family: bool) -> Result<()> {
        let factor = 1.0 - darkness;
        let members = if family { self.family(key)? } else { vec![key] };
        for k in members {
            let Some(mob) = self.mobjects.get_mut(k) else {
                continue;
            };
            mob.color = mob.color.with_alpha(mob.color.a * factor);
            if let Some(data) = mob.vectorized_mut() {
                data.scale_alphas(factor);
            }
        }
        Ok(())
    }
}
