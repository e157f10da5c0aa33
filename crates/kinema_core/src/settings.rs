//! Engine Settings
//!
//! Defaults shared by the scene, the animation constructors and the driver.
//!
//! ```rust,ignore
//! use kinema_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::default()
//!     .with_frame_rate(60.0)
//!     .with_default_run_time(2.0);
//! ```

use crate::constants::{
    DEFAULT_ANIMATION_LAG_RATIO, DEFAULT_ANIMATION_LAGGED_START_LAG_RATIO,
    DEFAULT_ANIMATION_RUN_TIME, DEFAULT_FRAME_RATE, DEFAULT_STROKE_WIDTH,
};

/// Tolerances used when deciding whether two path points coincide.
///
/// Two coordinates `a` and `b` are equal when
/// `|a - b| <= absolute + relative * |b|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTolerance {
    /// Absolute tolerance.
    pub absolute: f64,
    /// Tolerance relative to the magnitude of the compared coordinate.
    pub relative: f64,
}

impl Default for PointTolerance {
    fn default() -> Self {
        Self {
            absolute: 1e-6,
            relative: 1e-5,
        }
    }
}

impl PointTolerance {
    /// Component-wise closeness test.
    #[inline]
    #[must_use]
    pub fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Run time of a single animation when none is given, in seconds.
    pub default_run_time: f64,
    /// Lag ratio of animations and parallel groups when none is given.
    pub default_lag_ratio: f64,
    /// Lag ratio of a lagged start when none is given.
    pub lagged_start_lag_ratio: f64,
    /// Stroke width of freshly created vectorized mobjects.
    pub default_stroke_width: f64,
    /// Frames per second used by fixed-step displays.
    pub frame_rate: f64,
    /// Point equality tolerance for subpath detection.
    pub point_tolerance: PointTolerance,
    /// Run updaters every frame even when no mobject has any.
    pub always_update_mobjects: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_run_time: DEFAULT_ANIMATION_RUN_TIME,
            default_lag_ratio: DEFAULT_ANIMATION_LAG_RATIO,
            lagged_start_lag_ratio: DEFAULT_ANIMATION_LAGGED_START_LAG_RATIO,
            default_stroke_width: DEFAULT_STROKE_WIDTH,
            frame_rate: DEFAULT_FRAME_RATE,
            point_tolerance: PointTolerance::default(),
            always_update_mobjects: false,
        }
    }
}

impl EngineSettings {
    #[must_use]
    pub fn with_default_run_time(mut self, run_time: f64) -> Self {
        self.default_run_time = run_time;
        self
    }

    #[must_use]
    pub fn with_default_lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.default_lag_ratio = lag_ratio;
        self
    }

    #[must_use]
    pub fn with_lagged_start_lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.lagged_start_lag_ratio = lag_ratio;
        self
    }

    #[must_use]
    pub fn with_default_stroke_width(mut self, width: f64) -> Self {
        self.default_stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = fps;
        self
    }

    #[must_use]
    pub fn with_point_tolerance(mut self, tolerance: PointTolerance) -> Self {
        self.point_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_always_update_mobjects(mut self, always: bool) -> Self {
        self.always_update_mobjects = always;
        self
    }

    /// Seconds between two frames at the configured frame rate.
    #[inline]
    #[must_use]
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.frame_rate
    }
}
