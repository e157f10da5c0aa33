//! Morphing one mobject into another.

use kinema_core::errors::Result;
use kinema_scene::{MobjectKey, Scene};

use crate::animation::{AnimationCore, InterpolationRule, SingleAnimation};

/// Morphs the mobject into the shape and style of `target`.
///
/// The target itself is never touched: at `begin` a copy of it is aligned
/// with the mobject (which may grow invisible children or extra curves), and
/// every frame blends each family member from its starting state toward the
/// aligned copy.
#[derive(Debug, Clone)]
pub struct Transform {
    target: MobjectKey,
    target_copy: Option<MobjectKey>,
}

impl Transform {
    #[must_use]
    pub fn new(target: MobjectKey) -> Self {
        Self {
            target,
            target_copy: None,
        }
    }

    #[must_use]
    pub fn target(&self) -> MobjectKey {
        self.target
    }
}

impl InterpolationRule for Transform {
    fn name(&self) -> &'static str {
        "Transform"
    }

    fn prepare(&mut self, scene: &mut Scene, core: &mut AnimationCore) -> Result<()> {
        let target_copy = scene.copy(self.target)?;
        scene.align_data(core.mobject, target_copy)?;
        self.target_copy = Some(target_copy);
        core.extra_mobjects.push(target_copy);
        Ok(())
    }

    fn interpolate_mobject(&mut self, scene: &mut Scene, core: &AnimationCore, alpha: f64) -> Result<()> {
        core.for_each_submobject(scene, alpha, |scene, row, sub_alpha| {
            scene.interpolate(row[0], row[1], row[2], sub_alpha)
        })
    }
}

#[must_use]
pub fn transform(scene: &Scene, mobject: MobjectKey, target: MobjectKey) -> SingleAnimation<Transform> {
    SingleAnimation::new(scene, mobject, Transform::new(target))
}
