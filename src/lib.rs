//! Kinema: mobject trees, Bezier path geometry and composable animations.
//!
//! This crate re-exports the member crates under one name:
//!
//! - [`core`]: errors, settings, colors, Bezier math and rate functions
//! - [`scene`]: the mobject arena and vectorized path engine
//! - [`animation`]: single animations and their composition
//! - [`app`]: the frame-stepped player
//!
//! Most programs only need the [`prelude`].

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub use kinema_animation as animation;
pub use kinema_app as app;
pub use kinema_core as core;
pub use kinema_scene as scene;

pub use kinema_animation::{
    Animation, AnimationGroup, AnimationState, DrawBorderThenFill, ShowCreation, SingleAnimation, Succession,
    Transform, UpdateFromAlphaFunc, UpdateFromFunc,
};
pub use kinema_app::{CancellationToken, Display, Flow, HeadlessDisplay, Player, RunOutcome};
pub use kinema_core::{Color, EngineSettings, KinemaError, RateFunc, Result};
pub use kinema_scene::{AnchorMode, Mobject, MobjectKey, MobjectKind, Paint, Scene, Updater};

pub mod prelude {
    pub use glam::DVec3;

    pub use kinema_animation::{
        Animation, AnimationGroup, Succession, draw_border_then_fill, lagged_start, show_creation, transform,
        uncreate, update_from_alpha_func, update_from_func, write,
    };
    pub use kinema_app::{CancellationToken, Flow, Player, RunOutcome};
    pub use kinema_core::constants::*;
    pub use kinema_core::{Color, EngineSettings, KinemaError, RateFunc, Result};
    pub use kinema_scene::{AnchorMode, Mobject, MobjectKey, Paint, Scene, Updater};
}
