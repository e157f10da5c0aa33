//! Easing curves mapping linear progress to eased progress.

use std::fmt;
use std::rc::Rc;

#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quintic ease-in-out with zero first and second derivatives at both ends.
#[inline]
#[must_use]
pub fn smooth(t: f64) -> f64 {
    let s = 1.0 - t;
    t * t * t * (10.0 * s * s + 5.0 * s * t + t * t)
}

#[must_use]
pub fn double_smooth(t: f64) -> f64 {
    if t < 0.5 {
        smooth(2.0 * t) / 2.0
    } else {
        (smooth(2.0 * t - 1.0) + 1.0) / 2.0
    }
}

/// Goes from 0 to 1 and back to 0.
#[must_use]
pub fn there_and_back(t: f64) -> f64 {
    if t < 0.5 {
        smooth(2.0 * t)
    } else {
        smooth(2.0 * (1.0 - t))
    }
}

/// Shared handle to an easing function.
#[derive(Clone)]
pub struct RateFunc {
    name: &'static str,
    func: Rc<dyn Fn(f64) -> f64>,
}

impl RateFunc {
    pub fn new(name: &'static str, func: impl Fn(f64) -> f64 + 'static) -> Self {
        Self {
            name,
            func: Rc::new(func),
        }
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::new("linear", linear)
    }

    #[must_use]
    pub fn smooth() -> Self {
        Self::new("smooth", smooth)
    }

    #[must_use]
    pub fn double_smooth() -> Self {
        Self::new("double_smooth", double_smooth)
    }

    #[must_use]
    pub fn there_and_back() -> Self {
        Self::new("there_and_back", there_and_back)
    }

    /// `t -> self(1 - t)`.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let inner = Rc::clone(&self.func);
        Self {
            name: "inverted",
            func: Rc::new(move |t| inner(1.0 - t)),
        }
    }

    #[inline]
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        (self.func)(t)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Free-function form of [`RateFunc::inverted`].
#[must_use]
pub fn invert(func: &RateFunc) -> RateFunc {
    func.inverted()
}

impl fmt::Debug for RateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RateFunc").field(&self.name).finish()
    }
}
