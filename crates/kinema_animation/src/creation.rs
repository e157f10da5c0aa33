//! Animations that draw a mobject into existence or erase it.

use rustc_hash::FxHashSet;

use kinema_core::constants::TRANSPARENT;
use kinema_core::errors::Result;
use kinema_core::math::{Color, RateFunc, integer_interpolate};
use kinema_scene::{MobjectKey, Paint, Scene};

use crate::animation::{AnimationCore, InterpolationRule, SingleAnimation};

// ============================================================================
// ShowCreation / Uncreate
// ============================================================================

/// Reveals every family member's path from its start, `[0, alpha]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowCreation;

impl InterpolationRule for ShowCreation {
    fn name(&self) -> &'static str {
        "ShowCreation"
    }

    fn interpolate_mobject(&mut self, scene: &mut Scene, core: &AnimationCore, alpha: f64) -> Result<()> {
        core.for_each_submobject(scene, alpha, |scene, row, sub_alpha| {
            scene.pointwise_become_partial(row[0], row[1], 0.0, sub_alpha)
        })
    }
}

#[must_use]
pub fn show_creation(scene: &Scene, mobject: MobjectKey) -> SingleAnimation<ShowCreation> {
    SingleAnimation::new(scene, mobject, ShowCreation)
}

/// [`ShowCreation`] run backwards with the mobject removed at the end.
#[must_use]
pub fn uncreate(scene: &Scene, mobject: MobjectKey) -> SingleAnimation<ShowCreation> {
    SingleAnimation::new(scene, mobject, ShowCreation)
        .with_rate_func(RateFunc::smooth().inverted())
        .with_remover(true)
        .with_name("Uncreate")
}

// ============================================================================
// DrawBorderThenFill / Write
// ============================================================================

/// Traces an outline of the mobject during the first half, then blends
/// from the outline into the original style during the second.
#[derive(Debug, Clone)]
pub struct DrawBorderThenFill {
    pub stroke_width: f64,
    /// Outline color; when unset each member uses its own stroke color, or
    /// its base color if it has no stroke.
    pub stroke_color: Option<Color>,
    outline: Option<MobjectKey>,
    filling: FxHashSet<MobjectKey>,
}

impl Default for DrawBorderThenFill {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_color: None,
            outline: None,
            filling: FxHashSet::default(),
        }
    }
}

impl DrawBorderThenFill {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    /// The outline spawned at `begin`.
    #[must_use]
    pub fn outline(&self) -> Option<MobjectKey> {
        self.outline
    }

    fn outline_color(&self, scene: &Scene, key: MobjectKey) -> Result<Color> {
        if let Some(color) = self.stroke_color {
            return Ok(color);
        }
        let mob = scene.get(key)?;
        let data = mob.require_vectorized("draw_border_then_fill")?;
        Ok(if data.stroke_width > 0.0 { data.stroke_color() } else { mob.color })
    }

    fn spawn_outline(&self, scene: &mut Scene, mobject: MobjectKey) -> Result<MobjectKey> {
        let outline = scene.copy(mobject)?;
        scene.set_fill(outline, &Paint::color(TRANSPARENT))?;
        for member in scene.vectorized_family(outline)? {
            let color = self.outline_color(scene, member)?;
            let paint = Paint::color(color).with_width(self.stroke_width).with_family(false);
            scene.set_stroke(member, &paint)?;
        }
        Ok(outline)
    }

    /// Snaps `key` onto the outline the first time its member reaches the
    /// fill phase.
    fn enter_fill(scene: &mut Scene, key: MobjectKey, outline: MobjectKey) -> Result<()> {
        let source = scene.get(outline)?;
        let points = source.points.clone();
        let color = source.color;
        let style = source.vectorized().map(kinema_scene::VMobjectData::style);

        let mob = scene.get_mut(key)?;
        mob.points = points;
        mob.color = color;
        if let (Some(data), Some(style)) = (mob.vectorized_mut(), style) {
            data.replace_style(style);
        }
        Ok(())
    }
}

impl InterpolationRule for DrawBorderThenFill {
    fn name(&self) -> &'static str {
        "DrawBorderThenFill"
    }

    fn prepare(&mut self, scene: &mut Scene, core: &mut AnimationCore) -> Result<()> {
        scene.get(core.mobject)?.require_vectorized("draw_border_then_fill")?;
        let outline = self.spawn_outline(scene, core.mobject)?;
        self.outline = Some(outline);
        self.filling.clear();
        core.extra_mobjects.push(outline);
        Ok(())
    }

    fn after_begin(&mut self, scene: &mut Scene, core: &AnimationCore) -> Result<()> {
        match self.outline {
            Some(outline) => scene.match_style(core.mobject, outline, true),
            None => Ok(()),
        }
    }

    fn interpolate_mobject(&mut self, scene: &mut Scene, core: &AnimationCore, alpha: f64) -> Result<()> {
        let filling = &mut self.filling;
        core.for_each_submobject(scene, alpha, |scene, row, sub_alpha| {
            let [submob, start, outline] = [row[0], row[1], row[2]];
            let (index, phase_alpha) = integer_interpolate(0, 2, sub_alpha);
            if index == 0 {
                return scene.pointwise_become_partial(submob, outline, 0.0, phase_alpha);
            }
            if filling.insert(submob) {
                Self::enter_fill(scene, submob, outline)?;
            }
            scene.interpolate(submob, outline, start, phase_alpha)
        })
    }
}

#[must_use]
pub fn draw_border_then_fill(scene: &Scene, mobject: MobjectKey) -> SingleAnimation<DrawBorderThenFill> {
    let run_time = scene.settings().default_run_time * 2.0;
    SingleAnimation::new(scene, mobject, DrawBorderThenFill::new()).with_run_time(run_time)
}

/// [`DrawBorderThenFill`] paced for text-like families: linear, one second
/// for fewer than 15 pieces and two otherwise, with a lag of
/// `min(4 / pieces, 0.2)`.
pub fn write(scene: &Scene, mobject: MobjectKey) -> Result<SingleAnimation<DrawBorderThenFill>> {
    let length = scene.family_with_points(mobject)?.len();
    let run_time = if length < 15 { 1.0 } else { 2.0 };
    let lag_ratio = if length == 0 { 0.2 } else { (4.0 / length as f64).min(0.2) };
    Ok(SingleAnimation::new(scene, mobject, DrawBorderThenFill::new())
        .with_rate_func(RateFunc::linear())
        .with_run_time(run_time)
        .with_lag_ratio(lag_ratio)
        .with_name("Write"))
}
