//! Single-animation lifecycle.
//!
//! An animation drives one mobject from `begin` to `finish` through a series
//! of `interpolate(alpha)` calls. [`SingleAnimation`] holds the lifecycle and
//! timing shared by every simple animation; what actually happens to the
//! mobject at a given alpha is supplied by an [`InterpolationRule`].

use std::fmt;

use smallvec::SmallVec;

use kinema_core::errors::Result;
use kinema_core::math::RateFunc;
use kinema_core::settings::EngineSettings;
use kinema_scene::{MobjectKey, Scene};

/// Where an animation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Unstarted,
    Active,
    Finished,
}

/// Anything a driver can play.
///
/// Between [`Animation::begin`] and [`Animation::finish`], `interpolate` is
/// called with non-decreasing alpha; values outside `[0, 1]` are clamped.
pub trait Animation {
    fn begin(&mut self, scene: &mut Scene) -> Result<()>;

    fn finish(&mut self, scene: &mut Scene) -> Result<()>;

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) -> Result<()>;

    /// Runs the per-frame updaters of the mobjects this animation touches.
    fn update_mobjects(&mut self, scene: &mut Scene, dt: f64) -> Result<()>;

    /// Removes the mobject from the draw list for removers and frees the
    /// scratch mobjects the animation spawned.
    fn clean_up_from_scene(&mut self, scene: &mut Scene) -> Result<()>;

    /// The mobject being animated.
    fn mobject(&self) -> MobjectKey;

    /// The mobjects a driver should put on the draw list while playing.
    /// Composite animations list their children's mobjects instead of their
    /// own bookkeeping group.
    fn animated_mobjects(&self) -> Vec<MobjectKey> {
        vec![self.mobject()]
    }

    fn run_time(&self) -> f64;

    fn is_remover(&self) -> bool;

    fn name(&self) -> &str;

    fn state(&self) -> AnimationState;
}

impl fmt::Debug for dyn Animation + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(run_time: {}s)", self.name(), self.run_time())
    }
}

// ============================================================================
// Shared state
// ============================================================================

/// Timing and bookkeeping shared by simple animations.
#[derive(Debug, Clone)]
pub struct AnimationCore {
    pub mobject: MobjectKey,
    /// Copy of the mobject taken at `begin`.
    pub starting_mobject: Option<MobjectKey>,
    /// Further scratch mobjects zipped alongside the mobject's family.
    pub extra_mobjects: Vec<MobjectKey>,
    pub run_time: f64,
    pub rate_func: RateFunc,
    pub lag_ratio: f64,
    /// Whether the mobject's own updaters pause while the animation runs.
    pub suspend_mobject_updating: bool,
    pub remover: bool,
    pub name: String,
    pub state: AnimationState,
}

impl AnimationCore {
    #[must_use]
    pub fn new(mobject: MobjectKey, settings: &EngineSettings) -> Self {
        Self {
            mobject,
            starting_mobject: None,
            extra_mobjects: Vec::new(),
            run_time: settings.default_run_time,
            rate_func: RateFunc::smooth(),
            lag_ratio: settings.default_lag_ratio,
            suspend_mobject_updating: false,
            remover: false,
            name: String::new(),
            state: AnimationState::Unstarted,
        }
    }

    /// The mobject, its starting copy and the extra mobjects, in that order.
    #[must_use]
    pub fn all_mobjects(&self) -> Vec<MobjectKey> {
        let mut all = vec![self.mobject];
        all.extend(self.starting_mobject);
        all.extend_from_slice(&self.extra_mobjects);
        all
    }

    /// Local alpha of family member `index` out of `count`.
    ///
    /// The total span is stretched to `(count - 1) * lag_ratio + 1` and
    /// member `i` starts `i * lag_ratio` into it, so each member animates
    /// over a `1 / ((count - 1) * lag_ratio + 1)` share of the time.
    #[must_use]
    pub fn sub_alpha(&self, alpha: f64, index: usize, count: usize) -> f64 {
        let full_length = (count.saturating_sub(1)) as f64 * self.lag_ratio + 1.0;
        let lower = index as f64 * self.lag_ratio;
        (alpha * full_length - lower).clamp(0.0, 1.0)
    }

    /// Zips the families-with-points of [`AnimationCore::all_mobjects`] and
    /// calls `f` on every row with that row's lagged alpha.
    pub fn for_each_submobject(
        &self,
        scene: &mut Scene,
        alpha: f64,
        mut f: impl FnMut(&mut Scene, &[MobjectKey], f64) -> Result<()>,
    ) -> Result<()> {
        let families = self
            .all_mobjects()
            .into_iter()
            .map(|k| scene.family_with_points(k))
            .collect::<Result<Vec<_>>>()?;
        let count = families.iter().map(Vec::len).min().unwrap_or(0);

        for i in 0..count {
            let row: SmallVec<[MobjectKey; 4]> = families.iter().map(|family| family[i]).collect();
            f(scene, &row, self.sub_alpha(alpha, i, count))?;
        }
        Ok(())
    }

    /// Frees the starting copy and the extra mobjects.
    pub fn release(&mut self, scene: &mut Scene) -> Result<()> {
        let scratch: Vec<_> = self.starting_mobject.take().into_iter().chain(self.extra_mobjects.drain(..)).collect();
        for key in scratch {
            if scene.contains(key) {
                scene.despawn_family(key)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Interpolation rules
// ============================================================================

/// What a simple animation does to its mobject.
pub trait InterpolationRule {
    /// Default animation name.
    fn name(&self) -> &'static str;

    /// Runs at `begin`, before the starting copy is taken.
    fn prepare(&mut self, _scene: &mut Scene, _core: &mut AnimationCore) -> Result<()> {
        Ok(())
    }

    /// Runs at `begin`, after the first `interpolate(0)`.
    fn after_begin(&mut self, _scene: &mut Scene, _core: &AnimationCore) -> Result<()> {
        Ok(())
    }

    /// Applies the eased `alpha` to the mobject.
    fn interpolate_mobject(&mut self, scene: &mut Scene, core: &AnimationCore, alpha: f64) -> Result<()>;
}

/// An [`AnimationCore`] driven by an [`InterpolationRule`].
pub struct SingleAnimation<R: InterpolationRule> {
    pub core: AnimationCore,
    pub rule: R,
}

impl<R: InterpolationRule> SingleAnimation<R> {
    /// Animation of `mobject` with the scene's default timing.
    pub fn new(scene: &Scene, mobject: MobjectKey, rule: R) -> Self {
        let mut core = AnimationCore::new(mobject, scene.settings());
        core.name = rule.name().to_string();
        Self { core, rule }
    }

    #[must_use]
    pub fn with_run_time(mut self, run_time: f64) -> Self {
        self.core.run_time = run_time;
        self
    }

    #[must_use]
    pub fn with_rate_func(mut self, rate_func: RateFunc) -> Self {
        self.core.rate_func = rate_func;
        self
    }

    #[must_use]
    pub fn with_lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.core.lag_ratio = lag_ratio;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.core.name = name.into();
        self
    }

    #[must_use]
    pub fn with_suspend_mobject_updating(mut self, suspend: bool) -> Self {
        self.core.suspend_mobject_updating = suspend;
        self
    }

    #[must_use]
    pub fn with_remover(mut self, remover: bool) -> Self {
        self.core.remover = remover;
        self
    }

    #[must_use]
    pub fn boxed(self) -> Box<dyn Animation>
    where
        R: 'static,
    {
        Box::new(self)
    }
}

impl<R: InterpolationRule> Animation for SingleAnimation<R> {
    fn begin(&mut self, scene: &mut Scene) -> Result<()> {
        self.rule.prepare(scene, &mut self.core)?;
        self.core.starting_mobject = Some(scene.copy(self.core.mobject)?);
        if self.core.suspend_mobject_updating {
            scene.suspend_updating(self.core.mobject, true)?;
        }
        self.core.state = AnimationState::Active;
        self.interpolate(scene, 0.0)?;
        self.rule.after_begin(scene, &self.core)
    }

    fn finish(&mut self, scene: &mut Scene) -> Result<()> {
        self.interpolate(scene, 1.0)?;
        if self.core.suspend_mobject_updating {
            scene.resume_updating(self.core.mobject, true)?;
        }
        self.core.state = AnimationState::Finished;
        Ok(())
    }

    fn interpolate(&mut self, scene: &mut Scene, alpha: f64) -> Result<()> {
        let alpha = self.core.rate_func.apply(alpha.clamp(0.0, 1.0));
        self.rule.interpolate_mobject(scene, &self.core, alpha)
    }

    fn update_mobjects(&mut self, scene: &mut Scene, dt: f64) -> Result<()> {
        for key in self.core.all_mobjects() {
            if key == self.core.mobject && self.core.suspend_mobject_updating {
                continue;
            }
            if scene.contains(key) {
                scene.update(key, dt, true)?;
            }
        }
        Ok(())
    }

    fn clean_up_from_scene(&mut self, scene: &mut Scene) -> Result<()> {
        if self.core.remover {
            scene.remove(&[self.core.mobject]);
        }
        self.core.release(scene)
    }

    fn mobject(&self) -> MobjectKey {
        self.core.mobject
    }

    fn run_time(&self) -> f64 {
        self.core.run_time
    }

    fn is_remover(&self) -> bool {
        self.core.remover
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn state(&self) -> AnimationState {
        self.core.state
    }
}
