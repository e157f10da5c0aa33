//! Frame-stepped scene driver.
//!
//! [`Player`] owns a [`Scene`] and a [`Display`] and advances animations one
//! display frame at a time. Every tick runs in a fixed order:
//!
//! 1. per-frame updaters of the listed mobjects, then of the animation's own
//!    mobjects
//! 2. animation interpolation at the new alpha
//! 3. display render, then scene time advances by `dt`
//!
//! # Example
//!
//! ```rust,ignore
//! let mut player = Player::headless();
//! let square = player.scene_mut().spawn(Mobject::vmobject_corners(&corners)?);
//! let outcome = player.run(|p| {
//!     let mut anim = show_creation(p.scene(), square);
//!     if p.play(&mut anim)?.ended_early() {
//!         return Ok(Flow::EndedEarly);
//!     }
//!     p.wait(1.0)
//! })?;
//! ```

use kinema_animation::{Animation, AnimationGroup};
use kinema_core::errors::{KinemaError, Result};
use kinema_core::settings::EngineSettings;
use kinema_scene::{MobjectKey, Scene};

use crate::cancel::CancellationToken;
use crate::display::{Display, HeadlessDisplay};

/// Whether playback should go on after a `play` or `wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The cancellation token fired; no further frames were run.
    EndedEarly,
}

impl Flow {
    #[inline]
    #[must_use]
    pub fn ended_early(self) -> bool {
        self == Flow::EndedEarly
    }
}

/// How a [`Player::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    EndedEarly,
}

/// Per-frame timing information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Scene time in seconds.
    pub time: f64,
    /// Duration of the last frame in seconds.
    pub dt: f64,
    pub frame_count: u64,
}

pub struct Player<D: Display = HeadlessDisplay> {
    scene: Scene,
    display: D,
    token: CancellationToken,
    frame_count: u64,
    last_dt: f64,
}

impl Player<HeadlessDisplay> {
    /// Empty scene on a headless display at the default frame rate.
    #[must_use]
    pub fn headless() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Empty scene with `settings`, on a headless display ticking at the
    /// configured frame rate.
    #[must_use]
    pub fn with_settings(settings: EngineSettings) -> Self {
        let display = HeadlessDisplay::with_frame_duration(settings.frame_duration());
        Self::new(Scene::with_settings(settings), display)
    }
}

impl Default for Player<HeadlessDisplay> {
    fn default() -> Self {
        Self::headless()
    }
}

impl<D: Display> Player<D> {
    pub fn new(scene: Scene, display: D) -> Self {
        Self {
            scene,
            display,
            token: CancellationToken::new(),
            frame_count: 0,
            last_dt: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// A handle that stops playback when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            time: self.scene.time(),
            dt: self.last_dt,
            frame_count: self.frame_count,
        }
    }

    /// Listed mobjects not contained in another listed mobject.
    #[must_use]
    pub fn top_level_mobjects(&self) -> Vec<MobjectKey> {
        self.scene.top_level_mobjects()
    }

    /// Mobjects a renderer has to redraw every frame while `animation` plays.
    #[must_use]
    pub fn moving_mobjects(&self, animation: &dyn Animation) -> Vec<MobjectKey> {
        let animated = self.scene.families_of(&animation.animated_mobjects());
        self.scene.moving_mobjects(&animated)
    }

    // ========================================================================
    // Animation lifecycle
    // ========================================================================

    /// Begins `animation` and puts its mobjects on the draw list if they are
    /// not drawn yet.
    pub fn begin_animation(&mut self, animation: &mut dyn Animation) -> Result<()> {
        let current = self.scene.mobject_families();
        animation.begin(&mut self.scene)?;
        let missing: Vec<_> = animation
            .animated_mobjects()
            .into_iter()
            .filter(|key| !current.contains(key))
            .collect();
        if !missing.is_empty() {
            self.scene.add(&missing);
        }
        log::debug!("Began {:?}", animation);
        Ok(())
    }

    /// Ticks until `animation.run_time()` seconds of frames have elapsed.
    ///
    /// Returns [`Flow::EndedEarly`] right after the tick in which the
    /// cancellation token fired.
    pub fn progress_through_animation(&mut self, animation: &mut dyn Animation) -> Result<Flow> {
        let run_time = animation.run_time();
        let mut elapsed = 0.0;
        while elapsed < run_time {
            let dt = self.next_frame()?;
            elapsed += dt;

            self.update_mobjects_around(animation, dt)?;
            animation.interpolate(&mut self.scene, elapsed / run_time)?;
            self.update_frame(dt);
            log::trace!("{} at {:.3}/{run_time:.3}s", animation.name(), elapsed.min(run_time));

            if self.token.is_cancelled() {
                return Ok(Flow::EndedEarly);
            }
        }
        Ok(Flow::Continue)
    }

    /// Finishes `animation`, lets it clean up, then runs a zero-length
    /// update so updaters see the final state.
    pub fn finish_animation(&mut self, animation: &mut dyn Animation) -> Result<()> {
        animation.finish(&mut self.scene)?;
        animation.clean_up_from_scene(&mut self.scene)?;
        self.scene.update_mobjects(0.0)
    }

    /// Plays `animation` to completion.
    ///
    /// When playback is cancelled the animation is left where the last tick
    /// put it: it is neither finished nor cleaned up.
    pub fn play(&mut self, animation: &mut dyn Animation) -> Result<Flow> {
        if self.token.is_cancelled() {
            return Ok(Flow::EndedEarly);
        }
        self.begin_animation(animation)?;
        if self.progress_through_animation(animation)?.ended_early() {
            return Ok(Flow::EndedEarly);
        }
        self.finish_animation(animation)?;
        Ok(Flow::Continue)
    }

    /// Plays `animations` in parallel as one [`AnimationGroup`].
    pub fn play_many(&mut self, animations: Vec<Box<dyn Animation>>) -> Result<Flow> {
        let mut group = AnimationGroup::new(&mut self.scene, animations)?;
        self.play(&mut group)
    }

    /// Ticks for `duration` seconds running only the scene's updaters.
    pub fn wait(&mut self, duration: f64) -> Result<Flow> {
        if self.token.is_cancelled() {
            return Ok(Flow::EndedEarly);
        }
        let mut elapsed = 0.0;
        while elapsed < duration {
            let dt = self.next_frame()?;
            elapsed += dt;
            self.scene.update_mobjects(dt)?;
            self.update_frame(dt);
            if self.token.is_cancelled() {
                return Ok(Flow::EndedEarly);
            }
        }
        Ok(Flow::Continue)
    }

    /// Runs `construct` and renders the final frame.
    ///
    /// Early termination is an outcome, not an error: it is logged once and
    /// reported as [`RunOutcome::EndedEarly`].
    pub fn run(&mut self, construct: impl FnOnce(&mut Self) -> Result<Flow>) -> Result<RunOutcome> {
        let flow = construct(self)?;
        self.display.render(&self.scene);

        if flow.ended_early() || self.token.is_cancelled() {
            log::info!("Scene ended early at {:.2}s", self.scene.time());
            return Ok(RunOutcome::EndedEarly);
        }
        Ok(RunOutcome::Completed)
    }

    // ========================================================================
    // Ticks
    // ========================================================================

    fn next_frame(&mut self) -> Result<f64> {
        let dt = self.display.next_frame();
        if dt.is_finite() && dt > 0.0 {
            Ok(dt)
        } else {
            Err(KinemaError::InvalidArgument(format!("display returned a frame duration of {dt}")))
        }
    }

    /// Listed mobjects first, then the animation's own mobjects through the
    /// animation. Families of animated mobjects are left to the animation,
    /// even when they sit inside a listed group, so nothing updates twice.
    fn update_mobjects_around(&mut self, animation: &mut dyn Animation, dt: f64) -> Result<()> {
        let animated = animation.animated_mobjects();
        let listed = self.scene.mobject_list().to_vec();
        self.scene.update_all_except(&listed, dt, &animated)?;
        animation.update_mobjects(&mut self.scene, dt)
    }

    fn update_frame(&mut self, dt: f64) {
        self.display.render(&self.scene);
        self.scene.increment_time(dt);
        self.frame_count += 1;
        self.last_dt = dt;
    }
}
