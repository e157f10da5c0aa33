//! Vectorized mobjects: points as runs of cubic Bezier curves.
//!
//! Every curve is four points (anchor, handle, handle, anchor). A path under
//! construction may hold one pending point past the last full curve; that
//! point becomes the first anchor of the next curve added.
//!
//! - [`path`]: path construction on a single [`Mobject`](crate::Mobject)
//! - [`subpath`]: curve queries, subpath splitting and point alignment
//! - [`style`]: fill / stroke / background stroke handling
//! - [`dashed`]: sub-curves, dashes and per-curve decomposition

pub mod dashed;
pub mod path;
pub mod style;
pub mod subpath;

use kinema_core::constants::TRANSPARENT;
use kinema_core::math::Color;
use kinema_core::math::array::stretch_to_length;
use kinema_core::settings::PointTolerance;

/// Per-node payload of a vectorized mobject.
///
/// An empty color list means "never set"; getters report such a list as a
/// single transparent entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VMobjectData {
    pub fill_colors: Vec<Color>,
    pub stroke_colors: Vec<Color>,
    pub background_stroke_colors: Vec<Color>,
    pub stroke_width: f64,
    pub background_stroke_width: f64,
    /// Handle damping applied around [`crate::Scene::apply_function`].
    pub pre_function_handle_to_anchor_scale_factor: f64,
    pub make_smooth_after_applying_functions: bool,
    /// Tolerance used to decide whether two path points coincide.
    pub point_tolerance: PointTolerance,
}

impl Default for VMobjectData {
    fn default() -> Self {
        Self {
            fill_colors: Vec::new(),
            stroke_colors: Vec::new(),
            background_stroke_colors: Vec::new(),
            stroke_width: 0.0,
            background_stroke_width: 0.0,
            pre_function_handle_to_anchor_scale_factor: 0.01,
            make_smooth_after_applying_functions: false,
            point_tolerance: PointTolerance::default(),
        }
    }
}

impl VMobjectData {
    /// Filled and stroked with `color`, no background stroke.
    #[must_use]
    pub fn with_color(color: Color, stroke_width: f64) -> Self {
        Self {
            fill_colors: vec![color],
            stroke_colors: vec![color],
            stroke_width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fill_colors(&self) -> Vec<Color> {
        or_transparent(&self.fill_colors)
    }

    #[must_use]
    pub fn stroke_colors(&self) -> Vec<Color> {
        or_transparent(&self.stroke_colors)
    }

    #[must_use]
    pub fn background_stroke_colors(&self) -> Vec<Color> {
        or_transparent(&self.background_stroke_colors)
    }

    #[must_use]
    pub fn fill_color(&self) -> Color {
        self.fill_colors.first().copied().unwrap_or(TRANSPARENT)
    }

    #[must_use]
    pub fn stroke_color(&self) -> Color {
        self.stroke_colors.first().copied().unwrap_or(TRANSPARENT)
    }

    #[must_use]
    pub fn background_stroke_color(&self) -> Color {
        self.background_stroke_colors.first().copied().unwrap_or(TRANSPARENT)
    }

    /// Snapshot of the effective style.
    #[must_use]
    pub fn style(&self) -> VMobjectStyle {
        VMobjectStyle {
            fill_colors: self.fill_colors(),
            stroke_colors: self.stroke_colors(),
            stroke_width: self.stroke_width,
            background_stroke_colors: self.background_stroke_colors(),
            background_stroke_width: self.background_stroke_width,
        }
    }

    /// Applies a style snapshot to this node alone.
    pub fn apply_style(&mut self, style: &VMobjectStyle) {
        merge_colors(&mut self.fill_colors, &style.fill_colors);
        merge_colors(&mut self.stroke_colors, &style.stroke_colors);
        merge_colors(&mut self.background_stroke_colors, &style.background_stroke_colors);
        self.stroke_width = style.stroke_width;
        self.background_stroke_width = style.background_stroke_width;
    }

    /// Overwrites every style field with `style`, lengths included.
    pub fn replace_style(&mut self, style: VMobjectStyle) {
        self.fill_colors = style.fill_colors;
        self.stroke_colors = style.stroke_colors;
        self.background_stroke_colors = style.background_stroke_colors;
        self.stroke_width = style.stroke_width;
        self.background_stroke_width = style.background_stroke_width;
    }

    /// Multiplies the alpha of every fill, stroke and background color.
    pub fn scale_alphas(&mut self, factor: f64) {
        for list in [
            &mut self.fill_colors,
            &mut self.stroke_colors,
            &mut self.background_stroke_colors,
        ] {
            for color in list.iter_mut() {
                *color = color.with_alpha(color.a * factor);
            }
        }
    }
}

fn or_transparent(colors: &[Color]) -> Vec<Color> {
    if colors.is_empty() {
        vec![TRANSPARENT]
    } else {
        colors.to_vec()
    }
}

/// Writes `colors` into `existing`, keeping the longer of the two lengths.
///
/// The shorter side is resampled with [`stretch_to_length`], so setting a
/// single color on a gradient of three paints all three entries. An empty
/// `colors` leaves `existing` untouched.
pub(crate) fn merge_colors(existing: &mut Vec<Color>, colors: &[Color]) {
    if colors.is_empty() {
        return;
    }
    let length = existing.len().max(colors.len());
    *existing = stretch_to_length(colors, length);
}

/// Style of a vectorized mobject, detached from any node.
#[derive(Debug, Clone, PartialEq)]
pub struct VMobjectStyle {
    pub fill_colors: Vec<Color>,
    pub stroke_colors: Vec<Color>,
    pub stroke_width: f64,
    pub background_stroke_colors: Vec<Color>,
    pub background_stroke_width: f64,
}

/// Arguments for [`crate::Scene::set_fill`], [`crate::Scene::set_stroke`] and
/// [`crate::Scene::set_background_stroke`].
///
/// `color`, when given, is appended after `colors`. `family` (default `true`)
/// applies the paint to every vectorized family member.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: Option<Color>,
    pub colors: Vec<Color>,
    pub width: Option<f64>,
    pub family: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: None,
            colors: Vec::new(),
            width: None,
            family: true,
        }
    }
}

impl Paint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn color(color: Color) -> Self {
        Self::new().with_color(color)
    }

    #[must_use]
    pub fn colors(colors: Vec<Color>) -> Self {
        Self::new().with_colors(colors)
    }

    #[must_use]
    pub fn width(width: f64) -> Self {
        Self::new().with_width(width)
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_family(mut self, family: bool) -> Self {
        self.family = family;
        self
    }

    /// `colors` followed by `color`.
    #[must_use]
    pub fn merged_colors(&self) -> Vec<Color> {
        let mut merged = self.colors.clone();
        merged.extend(self.color);
        merged
    }
}
