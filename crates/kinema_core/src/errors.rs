//! Error Types
//!
//! This module defines the error type used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`KinemaError`] covers the failure modes of the
//! interpolation core:
//! - Structural-invariant violations (self containment, cycles, stale handles)
//! - Path operations that need points the mobject does not have
//! - Capabilities a mobject variant does not provide
//! - Numeric edge cases (zero-length vectors, singular systems)
//!
//! Early termination of a scene run is not an error; it travels through the
//! driver's cancellation token instead.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, KinemaError>`.
//!
//! ```rust,ignore
//! use kinema_core::errors::{KinemaError, Result};
//!
//! fn checked() -> Result<()> {
//!     Err(KinemaError::EmptyPath("add_line_to"))
//! }
//! ```

use thiserror::Error;

/// The main error type for the Kinema engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinemaError {
    // ========================================================================
    // Structural Errors
    // ========================================================================
    /// A mobject was asked to list itself among its own children.
    #[error("Mobject can't contain itself")]
    SelfContainment,

    /// Adding the children would make the submobject graph cyclic.
    #[error("Adding submobject would create a cycle through {0}")]
    CycleDetected(String),

    /// The handle does not refer to a live mobject in the scene arena.
    #[error("Mobject handle is stale or belongs to another scene: {0}")]
    StaleHandle(String),

    /// Two structures that must line up position-wise do not.
    #[error("Length mismatch in {context}: {left} vs {right}")]
    LengthMismatch {
        /// What was being paired
        context: &'static str,
        /// Length of the left-hand side
        left: usize,
        /// Length of the right-hand side
        right: usize,
    },

    // ========================================================================
    // Path Errors
    // ========================================================================
    /// A path operation needs at least one existing point.
    #[error("Cannot {0} on an empty path")]
    EmptyPath(&'static str),

    /// An operation needs points but the mobject has none.
    #[error("Operation '{0}' requires a mobject with points")]
    NoPoints(&'static str),

    /// Curve index out of range.
    #[error("Curve index {index} out of range (curve count: {count})")]
    CurveIndexOutOfRange {
        /// The requested curve index
        index: usize,
        /// Number of curves in the path
        count: usize,
    },

    // ========================================================================
    // Capability Errors
    // ========================================================================
    /// The operation is not provided by this mobject variant.
    #[error("'{operation}' is not implemented for {variant}")]
    NotImplemented {
        /// Name of the missing operation
        operation: &'static str,
        /// Variant name of the mobject it was invoked on
        variant: String,
    },

    // ========================================================================
    // Numeric Errors
    // ========================================================================
    /// A direction or axis had zero length.
    #[error("Zero-length vector in {0}")]
    ZeroLengthVector(&'static str),

    /// A linear system could not be solved.
    #[error("Singular matrix in {0}")]
    SingularMatrix(&'static str),

    /// Two lines given to an intersection query are parallel.
    #[error("Lines do not intersect")]
    ParallelLines,

    /// An argument was outside its documented domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ========================================================================
    // Value Parsing Errors
    // ========================================================================
    /// Hex color string was not 3, 4, 6 or 8 hex digits.
    #[error("Hex string #{0} not well formatted")]
    InvalidHexColor(String),

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A composition that needs children was given none.
    #[error("Animations list cannot be empty")]
    EmptyAnimationList,
}

impl KinemaError {
    /// Shorthand for [`KinemaError::NotImplemented`].
    #[must_use]
    pub fn not_implemented(operation: &'static str, variant: impl Into<String>) -> Self {
        KinemaError::NotImplemented {
            operation,
            variant: variant.into(),
        }
    }
}

/// Alias for `Result<T, KinemaError>`.
pub type Result<T> = std::result::Result<T, KinemaError>;
