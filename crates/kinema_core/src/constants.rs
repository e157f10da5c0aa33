//! Engine-wide constants: directions, palette and animation defaults.

use glam::DVec3;

use crate::math::color::Color;

pub const PI: f64 = std::f64::consts::PI;
pub const TAU: f64 = std::f64::consts::TAU;
pub const DEGREES: f64 = TAU / 360.0;

// ============================================================================
// Directions
// ============================================================================

pub const ORIGIN: DVec3 = DVec3::ZERO;
pub const LEFT: DVec3 = DVec3::new(-1.0, 0.0, 0.0);
pub const RIGHT: DVec3 = DVec3::new(1.0, 0.0, 0.0);
pub const UP: DVec3 = DVec3::new(0.0, 1.0, 0.0);
pub const DOWN: DVec3 = DVec3::new(0.0, -1.0, 0.0);
pub const OUT: DVec3 = DVec3::new(0.0, 0.0, 1.0);
pub const IN: DVec3 = DVec3::new(0.0, 0.0, -1.0);

pub const UL: DVec3 = DVec3::new(-1.0, 1.0, 0.0);
pub const UR: DVec3 = DVec3::new(1.0, 1.0, 0.0);
pub const DL: DVec3 = DVec3::new(-1.0, -1.0, 0.0);
pub const DR: DVec3 = DVec3::new(1.0, -1.0, 0.0);

// ============================================================================
// Palette
// ============================================================================

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

pub const BLUE: Color = Color::rgb(0.3451, 0.76863, 0.86667); // #58C4DD
pub const TEAL: Color = Color::rgb(0.36078, 0.81569, 0.70196); // #5CD0B3
pub const GREEN: Color = Color::rgb(0.51373, 0.75686, 0.40392); // #83C167
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0); // #FFFF00
pub const GOLD: Color = Color::rgb(0.94118, 0.67451, 0.37255); // #F0AC5F
pub const RED: Color = Color::rgb(0.98824, 0.38431, 0.33333); // #FC6255
pub const MAROON: Color = Color::rgb(0.77255, 0.37255, 0.45098); // #C55F73
pub const PURPLE: Color = Color::rgb(0.60392, 0.44706, 0.67451); // #9A72AC
pub const PINK: Color = Color::rgb(0.81961, 0.27843, 0.74118); // #D147BD
pub const ORANGE: Color = Color::rgb(1.0, 0.52549, 0.18431); // #FF862F

pub const LIGHT_GRAY: Color = Color::rgb(0.73333, 0.73333, 0.73333); // #BBBBBB
pub const GRAY: Color = Color::rgb(0.53333, 0.53333, 0.53333); // #888888
pub const DARK_GRAY: Color = Color::rgb(0.26667, 0.26667, 0.26667); // #444444

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;
pub const DEFAULT_FRAME_RATE: f64 = 25.0;

pub const DEFAULT_ANIMATION_RUN_TIME: f64 = 1.0;
pub const DEFAULT_ANIMATION_LAG_RATIO: f64 = 0.0;
pub const DEFAULT_ANIMATION_LAGGED_START_LAG_RATIO: f64 = 0.05;

/// Control points per cubic Bezier curve (anchor, handle, handle, anchor).
pub const POINTS_PER_CURVE: usize = 4;
