//! Math Module
//!
//! Numeric building blocks of the engine:
//!
//! - [`color`]: RGBA color values, hex and HSV conversion, gradients
//! - [`interpolate`]: the [`Interpolatable`] trait and linear blending
//! - [`bezier`]: curve evaluation, sub-curve extraction, smooth handles
//! - [`binomial`]: memoized binomial coefficients
//! - [`rate_functions`]: easing curves
//! - [`space_ops`]: rotations and line intersection on `DVec3`
//! - [`array`]: list resampling helpers
//! - [`linalg`]: the small solver behind handle smoothing

pub mod array;
pub mod bezier;
pub mod binomial;
pub mod color;
pub mod interpolate;
pub mod linalg;
pub mod rate_functions;
pub mod space_ops;

pub use bezier::{
    bezier, bezier_point, get_smooth_handle_points, integer_interpolate, is_closed,
    partial_bezier_points,
};
pub use color::{Color, color_gradient};
pub use interpolate::{Interpolatable, interpolate, inverse_interpolate, mid};
pub use rate_functions::RateFunc;
