//! Animations for the Kinema engine.
//!
//! Every animation implements [`Animation`]: a driver calls `begin`, then
//! `interpolate` with non-decreasing alpha once per frame, then `finish` and
//! `clean_up_from_scene`.
//!
//! - [`animation`]: the lifecycle shared by simple animations and the
//!   [`InterpolationRule`] seam they plug into
//! - [`creation`]: `ShowCreation`, `Uncreate`, `DrawBorderThenFill`, `Write`
//! - [`update`]: closure-driven animations
//! - [`transform`]: morphing into a target
//! - [`composition`]: parallel groups, successions and lagged starts

pub mod animation;
pub mod composition;
pub mod creation;
pub mod transform;
pub mod update;

pub use animation::{Animation, AnimationCore, AnimationState, InterpolationRule, SingleAnimation};
pub use composition::{AnimationGroup, Succession, Timing, lagged_start};
pub use creation::{DrawBorderThenFill, ShowCreation, draw_border_then_fill, show_creation, uncreate, write};
pub use transform::{Transform, transform};
pub use update::{UpdateFromAlphaFunc, UpdateFromFunc, update_from_alpha_func, update_from_func};
