//! Chainable mobject operation wrapper.
//!
//! [`MobjectRef`] borrows a [`Scene`] mutably and provides a fluent API for
//! the common geometric and styling edits, so scripts can write
//! `scene.mobject(key).shift(RIGHT).scale(2.0)` instead of threading
//! `Result`s through every call.
//!
//! Errors (a stale handle, a path operation on a plain node) are logged as
//! warnings and the chain continues. Use the `Scene` methods directly when
//! the error matters.
//!
//! # Example
//!
//! ```rust,ignore
//! scene.mobject(square)
//!     .shift(UP)
//!     .rotate(PI / 4.0)
//!     .set_color(BLUE)
//!     .fade(0.5);
//! ```
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::must_use_candidate)]
use glam::DVec3;

use kinema_core::constants::{ORIGIN, OUT};
use kinema_core::errors::Result;
use kinema_core::math::Color;

use crate::MobjectKey;
use crate::scene::Scene;
use crate::vmobject::Paint;

/// Temporary mutable borrow of a mobject for chainable operations.
pub struct MobjectRef<'a> {
    scene: &'a mut Scene,
    key: MobjectKey,
}

impl<'a> MobjectRef<'a> {
    #[inline]
    pub fn new(scene: &'a mut Scene, key: MobjectKey) -> Self {
        Self { scene, key }
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> MobjectKey {
        self.key
    }

    fn run(self, operation: &str, f: impl FnOnce(&mut Scene, MobjectKey) -> Result<()>) -> Self {
        if let Err(err) = f(&mut *self.scene, self.key) {
            log::warn!("{operation} on {:?} failed: {err}", self.key);
        }
        self
    }

    // -- Geometry --

    pub fn shift(self, delta: DVec3) -> Self {
        self.run("shift", |scene, key| scene.shift(key, delta))
    }

    /// Uniform scale about the center.
    pub fn scale(self, factor: f64) -> Self {
        self.run("scale", |scene, key| scene.scale_uniformly(key, factor, None, ORIGIN))
    }

    /// Rotation about the z axis through the center.
    pub fn rotate(self, angle: f64) -> Self {
        self.run("rotate", |scene, key| scene.rotate(key, angle, OUT, None, ORIGIN))
    }

    pub fn rotate_about(self, angle: f64, axis: DVec3, about_point: DVec3) -> Self {
        self.run("rotate", |scene, key| scene.rotate(key, angle, axis, Some(about_point), ORIGIN))
    }

    /// Moves the center to `point`.
    pub fn move_to(self, point: DVec3) -> Self {
        self.run("move_to", |scene, key| {
            let center = scene.center(key)?;
            scene.shift(key, point - center)
        })
    }

    pub fn apply_function(self, func: impl Fn(DVec3) -> DVec3) -> Self {
        self.run("apply_function", |scene, key| scene.apply_function(key, func))
    }

    // -- Style --

    pub fn set_color(self, color: Color) -> Self {
        self.run("set_color", |scene, key| scene.set_color(key, color, true))
    }

    pub fn set_fill(self, color: Color) -> Self {
        self.run("set_fill", |scene, key| scene.set_fill(key, &Paint::color(color)))
    }

    pub fn set_stroke(self, color: Color, width: f64) -> Self {
        self.run("set_stroke", |scene, key| {
            scene.set_stroke(key, &Paint::color(color).with_width(width))
        })
    }

    pub fn fade(self, darkness: f64) -> Self {
        self.run("fade", |scene, key| scene.fade(key, darkness, true))
    }

    // -- Structure --

    /// Puts `children` at the front of the submobject list.
    pub fn add(self, children: &[MobjectKey]) -> Self {
        self.run("add", |scene, key| scene.add_submobjects(key, children))
    }

    pub fn remove(self, children: &[MobjectKey]) -> Self {
        self.run("remove", |scene, key| scene.remove_submobjects(key, children))
    }

    pub fn suspend_updating(self) -> Self {
        self.run("suspend_updating", |scene, key| scene.suspend_updating(key, true))
    }

    pub fn resume_updating(self) -> Self {
        self.run("resume_updating", |scene, key| scene.resume_updating(key, true))
    }
}
