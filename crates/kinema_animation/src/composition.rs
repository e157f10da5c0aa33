//! Composite animations: parallel groups, successions and lagged starts.
//!
//! A group lays its children out on a shared timeline. Child `i` starts
//! where the previous child's window, interpolated by the group's lag ratio,
//! ends: a lag of 0 starts everything together, a lag of 1 plays the
//! children back to back.

use kinema_core::errors::{KinemaError, Result};
use kinema_core::math::array::first_seen_unique;
use kinema_core::math::{RateFunc, integer_interpolate, interpolate};
use kinema_scene::{Mobject, MobjectKey, Scene};

use crate::animation::{Animation, AnimationState};

/// Start and end time of one child on the group timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub start: f64,
    pub end: f64,
}

impl Timing {
    /// Local alpha of the child at group time `time`; zero for a window of
    /// zero width.
    #[must_use]
    pub fn local_alpha(&self, time: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 {
            return 0.0;
        }
        ((time - self.start) / span).clamp(0.0, 1.0)
    }
}

// ============================================================================
// AnimationGroup
// ============================================================================

/// Plays its children in parallel on a lagged timeline.
pub struct AnimationGroup {
    animations: Vec<Box<dyn Animation>>,
    /// Plain group whose children are the animated mobjects, deduplicated.
    group: MobjectKey,
    timings: Vec<Timing>,
    max_end_time: f64,
    run_time_override: Option<f64>,
    rate_func: RateFunc,
    lag_ratio: f64,
    name: String,
    state: AnimationState,
}

impl AnimationGroup {
    /// Groups `animations` with the scene's default lag ratio and a linear
    /// rate function.
    pub fn new(scene: &mut Scene, animations: Vec<Box<dyn Animation>>) -> Result<Self> {
        let mobjects: Vec<_> = animations.iter().map(|anim| anim.mobject()).collect();
        let group = scene.spawn(Mobject::group().with_name("AnimationGroup"));
        scene.add_submobjects(group, &first_seen_unique(&mobjects))?;

        let mut this = Self {
            animations,
            group,
            timings: Vec::new(),
            max_end_time: 0.0,
            run_time_override: None,
            rate_func: RateFunc::linear(),
            lag_ratio: scene.settings().default_lag_ratio,
            name: "AnimationGroup".to_string(),
            state: AnimationState::Unstarted,
        };
        this.compute_timings();
        Ok(this)
    }

    #[must_use]
    pub fn with_lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.lag_ratio = lag_ratio;
        self.compute_timings();
        self
    }

    /// Fixes the run time; by default it is the end of the last child window.
    #[must_use]
    pub fn with_run_time(mut self, run_time: f64) -> Self {
        self.run_time_override = Some(run_time);
        self
    }

    #[must_use]
    pub fn with_rate_func(mut self, rate_func: RateFunc) -> Self {
        self.rate_func = rate_func;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn boxed(self) -> Box<dyn Animation> {
        Box::new(self)
    }

    fn compute_timings(&mut self) {
        self.timings.clear();
        let mut current = 0.0;
        for anim in &self.animations {
            let start = current;
            let end = start + anim.run_time();
            self.timings.push(Timing { start, end });
            current = interpolate(start, end, self.lag_ratio);
        }
        self.max_end_time = self.timings.iter().map(|t| t.end).fold(0.0, f64::max);
    }

    #[must_use]
    pub fn timings(&self) -> &[Timing] {
        &self.timings
    }

    #[must_use]
    pub fn max_end_time(&self) -> f64 {
        self.max_end_time
    }

    #[must_use]
    pub fn lag_ratio(&self) -> f64 {
        self.lag_ratio
    }

    #[must_use]
    pub fn animations(&self) -> &[Box<dyn Animation>] {
        &self.animations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Animation for AnimationGroup {
    fn begin(&mut self, scene: &mut Scene) -> Result<()> {
        for anim in &mut self.animations {
            anim.begin(scene)?;
        }
        self.state = AnimationState::Active;
        Ok(())
    }

    fn finish(&mut self, scene: &mut Scene) -> Result<()> {
        for anim in &mut self.animations {
            anim.finish(scene)?;
        }
        self.state = AnimationState::Finished;
        Ok(())
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) -> Result<()> {
        let time = self.rate_func.apply(alpha.clamp(0.0, 1.0)) * self.max_end_time;
        for (anim, timing) in self.animations.iter_mut().zip(&self.timings) {
            anim.interpolate(scene, timing.local_alpha(time))?;
        }
        Ok(())
    }

    fn update_mobjects(&mut self, scene: &mut Scene, dt: f64) -> Result<()> {
        for anim in &mut self.animations {
            anim.update_mobjects(scene, dt)?;
        }
        Ok(())
    }

    fn clean_up_from_scene(&mut self, scene: &mut Scene) -> Result<()> {
        for anim in &mut self.animations {
            anim.clean_up_from_scene(scene)?;
        }
        if scene.contains(self.group) {
            scene.despawn(self.group)?;
        }
        Ok(())
    }

    fn mobject(&self) -> MobjectKey {
        self.group
    }

    fn animated_mobjects(&self) -> Vec<MobjectKey> {
        let nested: Vec<_> = self.animations.iter().flat_map(|anim| anim.animated_mobjects()).collect();
        first_seen_unique(&nested)
    }

    fn run_time(&self) -> f64 {
        self.run_time_override.unwrap_or(self.max_end_time)
    }

    fn is_remover(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> AnimationState {
        self.state
    }
}

/// Parallel group with the scene's lagged-start lag ratio.
pub fn lagged_start(scene: &mut Scene, animations: Vec<Box<dyn Animation>>) -> Result<AnimationGroup> {
    let lag_ratio = scene.settings().lagged_start_lag_ratio;
    Ok(AnimationGroup::new(scene, animations)?
        .with_lag_ratio(lag_ratio)
        .with_name("LaggedStart"))
}

// ============================================================================
// Succession
// ============================================================================

/// Plays its children one after another, with exactly one child active.
///
/// Global alpha is split into equal bins, one per child. Moving into a new
/// bin finishes the outgoing child and begins the incoming one, so every
/// child snapshots the state its predecessor left behind. Children whose bin
/// is skipped entirely within one frame are still begun and finished.
pub struct Succession {
    inner: AnimationGroup,
    active: usize,
}

impl Succession {
    pub fn new(scene: &mut Scene, animations: Vec<Box<dyn Animation>>) -> Result<Self> {
        if animations.is_empty() {
            return Err(KinemaError::EmptyAnimationList);
        }
        let inner = AnimationGroup::new(scene, animations)?
            .with_lag_ratio(1.0)
            .with_name("Succession");
        Ok(Self { inner, active: 0 })
    }

    #[must_use]
    pub fn with_run_time(mut self, run_time: f64) -> Self {
        self.inner = self.inner.with_run_time(run_time);
        self
    }

    #[must_use]
    pub fn with_rate_func(mut self, rate_func: RateFunc) -> Self {
        self.inner = self.inner.with_rate_func(rate_func);
        self
    }

    #[must_use]
    pub fn with_lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.inner = self.inner.with_lag_ratio(lag_ratio);
        self
    }

    #[must_use]
    pub fn boxed(self) -> Box<dyn Animation> {
        Box::new(self)
    }

    /// Index of the child currently playing.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn timings(&self) -> &[Timing] {
        self.inner.timings()
    }

    fn switch_to(&mut self, scene: &mut Scene, index: usize) -> Result<()> {
        let animations = &mut self.inner.animations;
        animations[self.active].finish(scene)?;
        for skipped in (self.active + 1)..index {
            log::trace!("Succession passing over child {skipped} within one frame");
            animations[skipped].begin(scene)?;
            animations[skipped].finish(scene)?;
        }
        animations[index].begin(scene)?;
        self.active = index;
        Ok(())
    }
}

impl Animation for Succession {
    fn begin(&mut self, scene: &mut Scene) -> Result<()> {
        self.active = 0;
        self.inner.animations[0].begin(scene)?;
        self.inner.state = AnimationState::Active;
        Ok(())
    }

    fn finish(&mut self, scene: &mut Scene) -> Result<()> {
        self.interpolate(scene, 1.0)?;
        self.inner.animations[self.active].finish(scene)?;
        self.inner.state = AnimationState::Finished;
        Ok(())
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) -> Result<()> {
        let alpha = self.inner.rate_func.apply(alpha.clamp(0.0, 1.0));
        let (index, sub_alpha) = integer_interpolate(0, self.inner.len(), alpha);
        if index != self.active {
            self.switch_to(scene, index)?;
        }
        self.inner.animations[index].interpolate(scene, sub_alpha)
    }

    fn update_mobjects(&mut self, scene: &mut Scene, dt: f64) -> Result<()> {
        self.inner.update_mobjects(scene, dt)
    }

    fn clean_up_from_scene(&mut self, scene: &mut Scene) -> Result<()> {
        self.inner.clean_up_from_scene(scene)
    }

    fn mobject(&self) -> MobjectKey {
        self.inner.mobject()
    }

    fn animated_mobjects(&self) -> Vec<MobjectKey> {
        self.inner.animated_mobjects()
    }

    fn run_time(&self) -> f64 {
        self.inner.run_time()
    }

    fn is_remover(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn state(&self) -> AnimationState {
        self.inner.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::update_from_func;

    fn idle(scene: &mut Scene, run_time: f64) -> Box<dyn Animation> {
        let key = scene.spawn(Mobject::new());
        update_from_func(scene, key, |_, _| Ok(())).with_run_time(run_time).boxed()
    }

    #[test]
    fn lag_ratio_places_windows() {
        let mut scene = Scene::new();
        let anims = vec![idle(&mut scene, 1.0), idle(&mut scene, 1.0), idle(&mut scene, 1.0)];
        let group = AnimationGroup::new(&mut scene, anims).unwrap().with_lag_ratio(0.5);

        let starts: Vec<f64> = group.timings().iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0.0, 0.5, 1.0]);
        assert_eq!(group.run_time(), 2.0);
    }

    #[test]
    fn zero_width_window_stays_at_zero() {
        let timing = Timing { start: 1.0, end: 1.0 };
        assert_eq!(timing.local_alpha(5.0), 0.0);
    }

    #[test]
    fn empty_group_has_zero_run_time() {
        let mut scene = Scene::new();
        let group = AnimationGroup::new(&mut scene, Vec::new()).unwrap();
        assert_eq!(group.run_time(), 0.0);
    }

    #[test]
    fn empty_succession_is_rejected() {
        let mut scene = Scene::new();
        assert!(matches!(
            Succession::new(&mut scene, Vec::new()),
            Err(KinemaError::EmptyAnimationList)
        ));
    }
}
