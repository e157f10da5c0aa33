//! RGBA color value type.
//!
//! Channels are nominally in `[0, 1]` but are not clamped: intermediate
//! arithmetic may leave the range. Arithmetic operators act on RGB only and
//! keep the left operand's alpha; [`Color::lerp`] interpolates all four
//! channels independently.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use glam::DVec4;

use crate::errors::{KinemaError, Result};
use crate::math::interpolate::{Interpolatable, interpolate};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[must_use]
    pub const fn gray(gray: f64, a: f64) -> Self {
        Self::new(gray, gray, gray, a)
    }

    /// Builds a color from hue, saturation and value, each in `[0, 1]`.
    #[must_use]
    pub fn from_hsv(h: f64, s: f64, v: f64, a: f64) -> Self {
        let scaled = h * 6.0;
        let i = scaled.floor();
        let f = scaled - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, a)
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 3 | 4 | 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KinemaError::InvalidHexColor(digits.to_string()));
        }

        let mut expanded: String = if digits.len() <= 4 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        if expanded.len() == 6 {
            expanded.push_str("ff");
        }

        let component = |range: std::ops::Range<usize>| -> Result<f64> {
            u8::from_str_radix(&expanded[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| KinemaError::InvalidHexColor(digits.to_string()))
        };

        Ok(Self::new(
            component(0..2)?,
            component(2..4)?,
            component(4..6)?,
            component(6..8)?,
        ))
    }

    /// Formats the color as `#rrggbbaa`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_int_rgba();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    #[inline]
    #[must_use]
    pub fn with_alpha(&self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    #[must_use]
    pub fn to_dvec4(&self) -> DVec4 {
        DVec4::new(self.r, self.g, self.b, self.a)
    }

    /// Channels scaled to bytes, saturating outside `[0, 1]`.
    #[must_use]
    pub fn to_int_rgba(&self) -> [u8; 4] {
        self.to_array().map(to_byte)
    }

    #[must_use]
    pub fn to_int_rgb(&self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    #[must_use]
    pub fn to_rgb_string(&self) -> String {
        let [r, g, b] = self.to_int_rgb();
        format!("rgb({r}, {g}, {b})")
    }

    #[must_use]
    pub fn to_rgba_string(&self) -> String {
        let [r, g, b] = self.to_int_rgb();
        format!("rgba({r}, {g}, {b}, {})", self.a)
    }

    /// Hue, saturation and value, computed on the byte-quantized channels.
    #[must_use]
    pub fn to_hsv(&self) -> [f64; 3] {
        let [r, g, b] = self.to_int_rgb().map(f64::from);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };
        let v = max / 255.0;

        let h = if d == 0.0 {
            0.0
        } else if max == r {
            (g - b + d * if g < b { 6.0 } else { 0.0 }) / (6.0 * d)
        } else if max == g {
            (b - r + d * 2.0) / (6.0 * d)
        } else {
            (r - g + d * 4.0) / (6.0 * d)
        };

        [h, s, v]
    }

    /// Same hue and saturation with inverted value.
    #[must_use]
    pub fn invert_and_preserve(&self) -> Self {
        let [h, s, v] = self.to_hsv();
        Self::from_hsv(h, s, 1.0 - v, self.a)
    }

    #[inline]
    #[must_use]
    pub fn lerp(&self, other: Color, alpha: f64) -> Self {
        Self::new(
            interpolate(self.r, other.r, alpha),
            interpolate(self.g, other.g, alpha),
            interpolate(self.b, other.b, alpha),
            interpolate(self.a, other.a, alpha),
        )
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Interpolatable for Color {
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self {
        start.lerp(end, t)
    }
}

impl From<DVec4> for Color {
    fn from(v: DVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgba_string())
    }
}

macro_rules! impl_rgb_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Color {
            type Output = Color;
            fn $method(self, rhs: Color) -> Color {
                Color::new(self.r $op rhs.r, self.g $op rhs.g, self.b $op rhs.b, self.a)
            }
        }

        impl $trait<f64> for Color {
            type Output = Color;
            fn $method(self, rhs: f64) -> Color {
                Color::new(self.r $op rhs, self.g $op rhs, self.b $op rhs, self.a)
            }
        }
    };
}

impl_rgb_op!(Add, add, +);
impl_rgb_op!(Sub, sub, -);
impl_rgb_op!(Mul, mul, *);
impl_rgb_op!(Div, div, /);

/// Samples `output_length` colors evenly along the polyline through
/// `reference` in RGBA space.
#[must_use]
pub fn color_gradient(reference: &[Color], output_length: usize) -> Vec<Color> {
    match (reference.len(), output_length) {
        (_, 0) | (0, _) => return Vec::new(),
        (1, n) => return vec![reference[0]; n],
        _ => {}
    }
    if output_length == 1 {
        return vec![reference[0]];
    }

    let last_segment = reference.len() - 2;
    (0..output_length)
        .map(|i| {
            let position = i as f64 * (reference.len() - 1) as f64 / (output_length - 1) as f64;
            let (index, residue) = if i == output_length - 1 {
                (last_segment, 1.0)
            } else {
                (position.floor() as usize, position.fract())
            };
            reference[index].lerp(reference[index + 1], residue)
        })
        .collect()
}
