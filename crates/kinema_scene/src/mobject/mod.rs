//! The scene-graph node.
//!
//! A [`Mobject`] owns its points, color, child keys and per-frame updaters.
//! What the points mean depends on [`MobjectKind`]: a plain node treats them
//! as a point cloud (usually empty for containers), a vectorized node treats
//! them as runs of cubic Bezier curves and carries fill/stroke styling.

mod align;
mod family;
mod geometry;
mod tree;
mod updater;

use std::fmt;

use glam::DVec3;

use kinema_core::constants::{DEFAULT_STROKE_WIDTH, ORIGIN, WHITE};
use kinema_core::errors::{KinemaError, Result};
use kinema_core::math::Color;

use crate::MobjectKey;
use crate::vmobject::VMobjectData;

pub use geometry::INSIDE_BUFFER;
pub use updater::Updater;

/// Variant-specific payload of a mobject.
#[derive(Debug, Clone, PartialEq)]
pub enum MobjectKind {
    /// Generic node; groups are plain nodes named `"Group"`.
    Plain,
    /// Path made of cubic Bezier curves with fill and stroke styling.
    Vectorized(VMobjectData),
    /// Single-point vectorized mobject reporting a fixed size.
    VectorizedPoint {
        data: VMobjectData,
        artificial_width: f64,
        artificial_height: f64,
    },
}

impl MobjectKind {
    /// Name used in "not implemented for ..." errors.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            MobjectKind::Plain => "Mobject",
            MobjectKind::Vectorized(_) => "VMobject",
            MobjectKind::VectorizedPoint { .. } => "VectorizedPoint",
        }
    }
}

#[derive(Clone)]
pub struct Mobject {
    pub name: String,
    pub color: Color,
    pub points: Vec<DVec3>,
    pub(crate) submobjects: Vec<MobjectKey>,
    /// Planning copy produced by [`crate::Scene::generate_target`]. Freeing
    /// the copy leaves a stale key here, which reads back as
    /// [`kinema_core::errors::KinemaError::StaleHandle`].
    pub target: Option<MobjectKey>,
    pub(crate) updaters: Vec<Updater>,
    pub updating_suspended: bool,
    pub kind: MobjectKind,
}

impl Default for Mobject {
    fn default() -> Self {
        Self::new()
    }
}

impl Mobject {
    /// Plain mobject with no points.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "Mobject".to_string(),
            color: WHITE,
            points: Vec::new(),
            submobjects: Vec::new(),
            target: None,
            updaters: Vec::new(),
            updating_suspended: false,
            kind: MobjectKind::Plain,
        }
    }

    /// Plain container. Children are attached with
    /// [`crate::Scene::add_submobjects`] or built with [`crate::Scene::group`].
    #[must_use]
    pub fn group() -> Self {
        Self::new().with_name("Group")
    }

    /// Empty vectorized mobject filled and stroked with `color`.
    #[must_use]
    pub fn vmobject(color: Color) -> Self {
        Self {
            name: "VMobject".to_string(),
            color,
            kind: MobjectKind::Vectorized(VMobjectData::with_color(color, DEFAULT_STROKE_WIDTH)),
            ..Self::new()
        }
    }

    /// Vectorized container.
    #[must_use]
    pub fn vgroup() -> Self {
        Self::vmobject(WHITE).with_name("VGroup")
    }

    /// White polyline through `corners`.
    pub fn vmobject_corners(corners: &[DVec3]) -> Result<Self> {
        let mut mob = Self::vmobject(WHITE);
        mob.set_points_as_corners(corners)?;
        Ok(mob)
    }

    /// Single point at `location` that reports the given width and height.
    #[must_use]
    pub fn vectorized_point(location: DVec3, color: Color, artificial_width: f64, artificial_height: f64) -> Self {
        Self {
            name: "VectorizedPoint".to_string(),
            color,
            points: vec![location],
            kind: MobjectKind::VectorizedPoint {
                data: VMobjectData::with_color(color, DEFAULT_STROKE_WIDTH),
                artificial_width,
                artificial_height,
            },
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DVec3>) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn submobjects(&self) -> &[MobjectKey] {
        &self.submobjects
    }

    #[inline]
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_updaters(&self) -> bool {
        !self.updaters.is_empty()
    }

    #[must_use]
    pub fn updaters(&self) -> &[Updater] {
        &self.updaters
    }

    #[inline]
    #[must_use]
    pub fn is_vectorized(&self) -> bool {
        self.vectorized().is_some()
    }

    #[must_use]
    pub fn vectorized(&self) -> Option<&VMobjectData> {
        match &self.kind {
            MobjectKind::Plain => None,
            MobjectKind::Vectorized(data) | MobjectKind::VectorizedPoint { data, .. } => Some(data),
        }
    }

    pub fn vectorized_mut(&mut self) -> Option<&mut VMobjectData> {
        match &mut self.kind {
            MobjectKind::Plain => None,
            MobjectKind::Vectorized(data) | MobjectKind::VectorizedPoint { data, .. } => Some(data),
        }
    }

    /// Vectorized data, or a "not implemented" error naming `operation`.
    pub fn require_vectorized(&self, operation: &'static str) -> Result<&VMobjectData> {
        self.vectorized()
            .ok_or_else(|| KinemaError::not_implemented(operation, self.kind.variant_name()))
    }

    pub fn require_vectorized_mut(&mut self, operation: &'static str) -> Result<&mut VMobjectData> {
        let variant = self.kind.variant_name();
        self.vectorized_mut()
            .ok_or_else(|| KinemaError::not_implemented(operation, variant))
    }

    /// Location of a [`MobjectKind::VectorizedPoint`], its only point.
    #[must_use]
    pub fn location(&self) -> DVec3 {
        self.points.first().copied().unwrap_or(ORIGIN)
    }

    /// Copy of this node's own data without children, updaters or target.
    #[must_use]
    pub fn detached_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            color: self.color,
            points: self.points.clone(),
            submobjects: Vec::new(),
            target: None,
            updaters: Vec::new(),
            updating_suspended: self.updating_suspended,
            kind: self.kind.clone(),
        }
    }
}

impl fmt::Debug for Mobject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mobject")
            .field("name", &self.name)
            .field("kind", &self.kind.variant_name())
            .field("points", &self.points.len())
            .field("submobjects", &self.submobjects)
            .field("updaters", &self.updaters.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Mobject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
