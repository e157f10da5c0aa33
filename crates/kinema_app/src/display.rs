//! Frame sources.
//!
//! A [`Display`] decides how long each frame lasts and receives the scene
//! once a frame has been computed. The player never looks at wall-clock
//! time itself, which keeps playback deterministic under test.

use kinema_scene::Scene;

/// Frame pacing and presentation.
pub trait Display {
    /// Waits for the next frame and returns its duration in seconds.
    fn next_frame(&mut self) -> f64;

    /// Presents the scene after a frame has been computed.
    fn render(&mut self, scene: &Scene);
}

/// Fixed-rate display that renders nowhere.
#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    frame_duration: f64,
    frames_rendered: u64,
    last_mobject_count: usize,
}

impl HeadlessDisplay {
    /// Display ticking at `frame_rate` frames per second.
    #[must_use]
    pub fn new(frame_rate: f64) -> Self {
        Self::with_frame_duration(1.0 / frame_rate)
    }

    #[must_use]
    pub fn with_frame_duration(frame_duration: f64) -> Self {
        Self {
            frame_duration,
            frames_rendered: 0,
            last_mobject_count: 0,
        }
    }

    #[must_use]
    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Number of mobjects (families flattened) in the last rendered frame.
    #[must_use]
    pub fn last_mobject_count(&self) -> usize {
        self.last_mobject_count
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new(kinema_core::constants::DEFAULT_FRAME_RATE)
    }
}

impl Display for HeadlessDisplay {
    fn next_frame(&mut self) -> f64 {
        self.frame_duration
    }

    fn render(&mut self, scene: &Scene) {
        self.frames_rendered += 1;
        self.last_mobject_count = scene.mobject_families().len();
    }
}
