//! Derived vectorized mobjects: sub-curves, dashes and per-curve pieces.

use kinema_core::constants::WHITE;
use kinema_core::errors::Result;
use kinema_core::math::Color;

use crate::MobjectKey;
use crate::mobject::Mobject;
use crate::scene::Scene;

pub const DEFAULT_NUM_DASHES: usize = 15;
pub const DEFAULT_POSITIVE_SPACE_RATIO: f64 = 0.5;

impl Scene {
    /// Copy of `key` whose own path is the `[a, b]` portion of the original.
    pub fn get_subcurve(&mut self, key: MobjectKey, a: f64, b: f64) -> Result<MobjectKey> {
        self.get(key)?.require_vectorized("get_subcurve")?;
        let copy = self.copy(key)?;
        self.pointwise_become_partial_vectorized(copy, key, a, b)?;
        Ok(copy)
    }

    /// Spawns a `"DashedVMobject"` whose children are `num_dashes` evenly
    /// spaced pieces of `key`'s path.
    ///
    /// Dash `i` covers `[i / n, i / n + ratio / n]`, so `positive_space_ratio`
    /// is the visible share of every period. The result takes `key`'s style;
    /// `color` (default: `key`'s color) only sets its base color.
    pub fn get_dashed(
        &mut self,
        key: MobjectKey,
        num_dashes: usize,
        positive_space_ratio: f64,
        color: Option<Color>,
    ) -> Result<MobjectKey> {
        let source = self.get(key)?;
        source.require_vectorized("get_dashed")?;
        let color = color.unwrap_or(source.color);

        let mut dashes = Vec::with_capacity(num_dashes);
        if num_dashes > 0 {
            let full = 1.0 / num_dashes as f64;
            let partial = full * positive_space_ratio;
            for i in 0..num_dashes {
                let alpha = i as f64 * full;
                dashes.push(self.get_subcurve(key, alpha, alpha + partial)?);
            }
        }

        let dashed = self.spawn(Mobject::vmobject(color).with_name("DashedVMobject"));
        self.add_submobjects(dashed, &dashes)?;
        self.match_style(dashed, key, false)?;
        log::debug!("Dashed {} into {} pieces", self.get(key)?.name, dashes.len());
        Ok(dashed)
    }

    /// Spawns a `"CurvesAsSubmobjects"` group holding one single-curve child
    /// per curve of `key`, each styled like `key`.
    pub fn curves_as_submobjects(&mut self, key: MobjectKey) -> Result<MobjectKey> {
        let source = self.get(key)?;
        source.require_vectorized("curves_as_submobjects")?;
        let curves = source.cubic_bezier_tuples();

        let mut parts = Vec::with_capacity(curves.len());
        for curve in curves {
            let part = self.spawn(Mobject::vmobject(WHITE).with_points(curve.to_vec()));
            self.match_style(part, key, true)?;
            parts.push(part);
        }
        let group = self.spawn(Mobject::vgroup().with_name("CurvesAsSubmobjects"));
        self.add_submobjects(group, &parts)?;
        Ok(group)
    }
}
