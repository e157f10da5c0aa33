//! Animations driven by user closures.

use kinema_core::errors::Result;
use kinema_scene::{MobjectKey, Scene};

use crate::animation::{AnimationCore, InterpolationRule, SingleAnimation};

type UpdateFn = Box<dyn FnMut(&mut Scene, MobjectKey) -> Result<()>>;
type AlphaUpdateFn = Box<dyn FnMut(&mut Scene, MobjectKey, f64) -> Result<()>>;

/// Calls a closure on the mobject every frame, ignoring alpha.
pub struct UpdateFromFunc {
    func: UpdateFn,
}

impl UpdateFromFunc {
    pub fn new(func: impl FnMut(&mut Scene, MobjectKey) -> Result<()> + 'static) -> Self {
        Self { func: Box::new(func) }
    }
}

impl InterpolationRule for UpdateFromFunc {
    fn name(&self) -> &'static str {
        "UpdateFromFunc"
    }

    fn interpolate_mobject(&mut self, scene: &mut Scene, core: &AnimationCore, _alpha: f64) -> Result<()> {
        (self.func)(scene, core.mobject)
    }
}

/// Calls a closure on the mobject every frame with the eased alpha.
pub struct UpdateFromAlphaFunc {
    func: AlphaUpdateFn,
}

impl UpdateFromAlphaFunc {
    pub fn new(func: impl FnMut(&mut Scene, MobjectKey, f64) -> Result<()> + 'static) -> Self {
        Self { func: Box::new(func) }
    }
}

impl InterpolationRule for UpdateFromAlphaFunc {
    fn name(&self) -> &'static str {
        "UpdateFromAlphaFunc"
    }

    fn interpolate_mobject(&mut self, scene: &mut Scene, core: &AnimationCore, alpha: f64) -> Result<()> {
        (self.func)(scene, core.mobject, alpha)
    }
}

pub fn update_from_func(
    scene: &Scene,
    mobject: MobjectKey,
    func: impl FnMut(&mut Scene, MobjectKey) -> Result<()> + 'static,
) -> SingleAnimation<UpdateFromFunc> {
    SingleAnimation::new(scene, mobject, UpdateFromFunc::new(func))
}

pub fn update_from_alpha_func(
    scene: &Scene,
    mobject: MobjectKey,
    func: impl FnMut(&mut Scene, MobjectKey, f64) -> Result<()> + 'static,
) -> SingleAnimation<UpdateFromAlphaFunc> {
    SingleAnimation::new(scene, mobject, UpdateFromAlphaFunc::new(func))
}
