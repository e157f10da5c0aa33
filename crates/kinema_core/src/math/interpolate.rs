use glam::DVec3;

/// Values that can be blended linearly between two endpoints.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self {
        start * (1.0 - t) + end * t
    }
}

impl Interpolatable for DVec3 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f64) -> Self {
        start * (1.0 - t) + end * t
    }
}

/// `start * (1 - alpha) + end * alpha`, exact at both ends of `[0, 1]`.
#[inline]
pub fn interpolate<T: Interpolatable>(start: T, end: T, alpha: f64) -> T {
    T::interpolate_linear(start, end, alpha)
}

#[inline]
pub fn mid<T: Interpolatable>(start: T, end: T) -> T {
    interpolate(start, end, 0.5)
}

/// The alpha at which `interpolate(start, end, alpha) == value`.
#[inline]
#[must_use]
pub fn inverse_interpolate(start: f64, end: f64, value: f64) -> f64 {
    (value - start) / (end - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let a = DVec3::new(1.0, -2.0, 3.5);
        let b = DVec3::new(-4.0, 0.25, 9.0);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
    }

    #[test]
    fn inverse_undoes_interpolate() {
        let v = interpolate(2.0, 10.0, 0.375);
        assert!((inverse_interpolate(2.0, 10.0, v) - 0.375).abs() < 1e-12);
    }
}
