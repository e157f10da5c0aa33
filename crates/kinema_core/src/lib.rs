//! Core value types, Bezier math, settings and errors shared by every
//! Kinema crate.

pub mod constants;
pub mod errors;
pub mod math;
pub mod settings;

pub use errors::{KinemaError, Result};
pub use math::{Color, Interpolatable, RateFunc};
pub use settings::{EngineSettings, PointTolerance};

pub use glam::{DMat3, DQuat, DVec3};
