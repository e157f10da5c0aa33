//! Banded linear solver for the handle-point systems.
//!
//! Only the diagonals inside the band are stored, plus `lower` extra upper
//! diagonals for the fill-in that row swaps produce, so both memory and
//! elimination work grow linearly with the system size.

use glam::DVec3;

use crate::errors::{KinemaError, Result};

const PIVOT_EPSILON: f64 = 1e-12;

/// Square matrix whose nonzeros satisfy `-lower <= col - row <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix {
    dim: usize,
    lower: usize,
    upper: usize,
    data: Vec<f64>,
}

impl BandedMatrix {
    #[must_use]
    pub fn zeros(dim: usize, lower: usize, upper: usize) -> Self {
        let width = 2 * lower + upper + 1;
        Self {
            dim,
            lower,
            upper,
            data: vec![0.0; dim * width],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn bandwidth(&self) -> (usize, usize) {
        (self.lower, self.upper)
    }

    #[inline]
    fn width(&self) -> usize {
        2 * self.lower + self.upper + 1
    }

    /// Storage slot of `(row, col)`, including the fill-in diagonals.
    #[inline]
    fn slot(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.dim || col >= self.dim || col + self.lower < row {
            return None;
        }
        let offset = col + self.lower - row;
        (offset < self.width()).then(|| row * self.width() + offset)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.slot(row, col).map_or(0.0, |slot| self.data[slot])
    }

    /// Writes an entry inside the band.
    ///
    /// # Errors
    /// [`KinemaError::InvalidArgument`] when `(row, col)` lies outside it.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let in_band = col + self.lower >= row && col <= row + self.upper;
        match self.slot(row, col) {
            Some(slot) if in_band => {
                self.data[slot] = value;
                Ok(())
            }
            _ => Err(KinemaError::InvalidArgument(format!(
                "entry ({row}, {col}) is outside a {}x{} band of ({}, {})",
                self.dim, self.dim, self.lower, self.upper
            ))),
        }
    }

    /// Solves `self * x = rhs` for vector-valued `x` by banded Gaussian
    /// elimination with partial pivoting. The matrix is consumed as scratch.
    ///
    /// # Errors
    /// [`KinemaError::LengthMismatch`] when `rhs` does not match the matrix
    /// size, [`KinemaError::SingularMatrix`] when no usable pivot exists.
    pub fn solve(mut self, rhs: &[DVec3], context: &'static str) -> Result<Vec<DVec3>> {
        let n = self.dim;
        if rhs.len() != n {
            return Err(KinemaError::LengthMismatch {
                context,
                left: n,
                right: rhs.len(),
            });
        }
        let mut b = rhs.to_vec();
        // Rightmost column a pivot row can reach once swaps have filled in.
        let reach = self.upper + self.lower;

        for k in 0..n {
            let last_row = (k + self.lower).min(n - 1);
            let last_col = (k + reach).min(n - 1);

            let mut pivot = k;
            for row in k + 1..=last_row {
                if self.get(row, k).abs() > self.get(pivot, k).abs() {
                    pivot = row;
                }
            }
            if self.get(pivot, k).abs() < PIVOT_EPSILON {
                return Err(KinemaError::SingularMatrix(context));
            }
            if pivot != k {
                for col in k..=last_col {
                    self.swap(k, pivot, col);
                }
                b.swap(k, pivot);
            }

            let diag = self.get(k, k);
            for row in k + 1..=last_row {
                let factor = self.get(row, k) / diag;
                if factor == 0.0 {
                    continue;
                }
                for col in k..=last_col {
                    let value = self.get(row, col) - factor * self.get(k, col);
                    self.store(row, col, value);
                }
                let pivot_rhs = b[k];
                b[row] -= pivot_rhs * factor;
            }
        }

        let mut x = vec![DVec3::ZERO; n];
        for k in (0..n).rev() {
            let mut acc = b[k];
            for col in k + 1..=(k + reach).min(n - 1) {
                let coeff = self.get(k, col);
                if coeff != 0.0 {
                    acc -= x[col] * coeff;
                }
            }
            x[k] = acc / self.get(k, k);
        }
        Ok(x)
    }

    fn swap(&mut self, a: usize, b: usize, col: usize) {
        if let (Some(sa), Some(sb)) = (self.slot(a, col), self.slot(b, col)) {
            self.data.swap(sa, sb);
        }
    }

    fn store(&mut self, row: usize, col: usize, value: f64) {
        if let Some(slot) = self.slot(row, col) {
            self.data[slot] = value;
        }
    }
}

/// A sparse system collected as `(row, col, value)` entries, then packed into
/// the narrowest band that holds them.
#[derive(Debug, Default, Clone)]
pub struct BandedSystem {
    entries: Vec<(usize, usize, f64)>,
    rhs: Vec<DVec3>,
}

impl BandedSystem {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            rhs: vec![DVec3::ZERO; dim],
        }
    }

    pub fn push(&mut self, row: usize, col: usize, value: f64) {
        self.entries.push((row, col, value));
    }

    pub fn set_rhs(&mut self, row: usize, value: DVec3) {
        if let Some(slot) = self.rhs.get_mut(row) {
            *slot = value;
        }
    }

    /// Solves the system after renumbering rows and unknowns through
    /// `position`, which must be a permutation of `0..dim`. A good ordering
    /// keeps coupled unknowns close so the band stays narrow.
    ///
    /// # Errors
    /// As [`BandedMatrix::solve`].
    pub fn solve_permuted(
        &self,
        position: impl Fn(usize) -> usize,
        context: &'static str,
    ) -> Result<Vec<DVec3>> {
        let dim = self.rhs.len();
        let (mut lower, mut upper) = (0, 0);
        for &(row, col, _) in &self.entries {
            let (r, c) = (position(row), position(col));
            lower = lower.max(r.saturating_sub(c));
            upper = upper.max(c.saturating_sub(r));
        }

        let mut matrix = BandedMatrix::zeros(dim, lower, upper);
        let mut rhs = vec![DVec3::ZERO; dim];
        for &(row, col, value) in &self.entries {
            let (r, c) = (position(row), position(col));
            let summed = matrix.get(r, c) + value;
            matrix.set(r, c, summed)?;
        }
        for (row, value) in self.rhs.iter().enumerate() {
            rhs[position(row)] = *value;
        }

        let permuted = matrix.solve(&rhs, context)?;
        Ok((0..dim).map(|unknown| permuted[position(unknown)]).collect())
    }
}
