// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-sliced quadratic systems over GF(2).
//!
//! A system of quadratic equations in variables `X_0 .. X_{n-1}` is stored as
//! a flat vector of `1 + n + n(n-1)/2` coefficient words. Bit `b` of every
//! word belongs to packed equation `b`, so one coefficient vector holds up to
//! 64 scalar equations and whole-system operations are word-parallel bitwise
//! operations (bitslicing).
//!
//! The layout is fixed and addressed only through [`idx1`] and [`idx2`]:
//!
//! - slot 0: the constant term,
//! - slot `idx1(i)`: the coefficient of `X_i`,
//! - slot `idx2(i, j)`, `i < j`: the coefficient of `X_i * X_j`.
//!
//! Truncating the vector to its first `idx1(m)` slots yields a valid layout
//! for the first `m` variables; every term mentioning a dropped variable
//! lives in a dropped slot. The decomposition in [`crate::decompose`] is
//! built entirely on this property.
//!
//! # Examples
//!
//! ```
//! use mq_search::QuadSystem;
//!
//! // x0 + x0*x1 = 0, as packed equation 0
//! let mut f = QuadSystem::zero(2);
//! f.xor_linear(0, 1);
//! f.xor_quadratic(0, 1, 1);
//!
//! assert_eq!(f.evaluate(0b00), 0); // satisfied
//! assert_eq!(f.evaluate(0b01), 1); // x0=1, x1=0 leaves a residual
//! assert_eq!(f.evaluate(0b11), 0); // the two terms cancel
//! ```

mod eval;
mod flip;

pub(crate) use eval::evaluate_words;
pub(crate) use flip::flip_top_words;

use crate::error::SolveError;

/// Maximum number of variables: an assignment is a single `u64` word.
pub const MAX_VARS: usize = 64;

/// Slot of the coefficient in front of `X_i`.
///
/// The variables are `X_0, X_1, ..., X_{n-1}`; slot 0 is the constant term.
#[inline]
pub const fn idx1(i: usize) -> usize {
    i * (i + 1) / 2 + 1
}

/// Slot of the coefficient in front of `X_i * X_j`, for `i < j`.
#[inline]
pub const fn idx2(i: usize, j: usize) -> usize {
    debug_assert!(i < j);
    idx1(j) + i + 1
}

/// Number of coefficient slots for an `n`-variable system: `1 + n + n(n-1)/2`.
///
/// Equal to `idx1(n)`, the first slot a hypothetical variable `X_n` would use.
#[inline]
pub const fn coeff_count(n: usize) -> usize {
    idx1(n)
}

/// A bit-sliced quadratic system over GF(2).
///
/// Owns its coefficient vector; the shape invariant
/// `coeffs.len() == coeff_count(vars)` holds for every constructed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadSystem {
    /// Number of variables, at most [`MAX_VARS`].
    vars: usize,

    /// Coefficient words, laid out per [`idx1`]/[`idx2`].
    coeffs: Vec<u64>,
}

impl QuadSystem {
    /// Create the all-zero system in `n` variables (every equation is `0 = 0`).
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`MAX_VARS`].
    pub fn zero(n: usize) -> Self {
        assert!(n <= MAX_VARS, "at most {} variables supported, got {}", MAX_VARS, n);
        Self {
            vars: n,
            coeffs: vec![0; coeff_count(n)],
        }
    }

    /// Create a system from a raw coefficient vector.
    ///
    /// Fails fast with [`SolveError::ShapeMismatch`] if the vector length
    /// does not match `coeff_count(n)`, and with
    /// [`SolveError::TooManyVariables`] if `n > MAX_VARS`.
    pub fn from_coeffs(n: usize, coeffs: Vec<u64>) -> Result<Self, SolveError> {
        if n > MAX_VARS {
            return Err(SolveError::TooManyVariables { vars: n, max: MAX_VARS });
        }
        let expected = coeff_count(n);
        if coeffs.len() != expected {
            return Err(SolveError::ShapeMismatch {
                vars: n,
                expected,
                got: coeffs.len(),
            });
        }
        Ok(Self { vars: n, coeffs })
    }

    /// Internal constructor for vectors whose shape is already guaranteed.
    pub(crate) fn from_parts(n: usize, coeffs: Vec<u64>) -> Self {
        debug_assert!(n <= MAX_VARS);
        debug_assert_eq!(coeffs.len(), coeff_count(n));
        Self { vars: n, coeffs }
    }

    /// Number of variables.
    pub fn vars(&self) -> usize {
        self.vars
    }

    /// The raw coefficient words, laid out per [`idx1`]/[`idx2`].
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// The bit-sliced constant term.
    pub fn constant(&self) -> u64 {
        self.coeffs[0]
    }

    /// The bit-sliced coefficient of `X_i`.
    pub fn linear(&self, i: usize) -> u64 {
        assert!(i < self.vars);
        self.coeffs[idx1(i)]
    }

    /// The bit-sliced coefficient of `X_i * X_j`, `i < j`.
    pub fn quadratic(&self, i: usize, j: usize) -> u64 {
        assert!(i < j && j < self.vars);
        self.coeffs[idx2(i, j)]
    }

    /// XOR `mask` into the constant term.
    pub fn xor_constant(&mut self, mask: u64) {
        self.coeffs[0] ^= mask;
    }

    /// XOR `mask` into the coefficient of `X_i`.
    pub fn xor_linear(&mut self, i: usize, mask: u64) {
        assert!(i < self.vars);
        self.coeffs[idx1(i)] ^= mask;
    }

    /// XOR `mask` into the coefficient of `X_i * X_j`, `i < j`.
    pub fn xor_quadratic(&mut self, i: usize, j: usize, mask: u64) {
        assert!(i < j && j < self.vars);
        self.coeffs[idx2(i, j)] ^= mask;
    }

    /// Copy of this system with every coefficient masked to its low 32 bits.
    ///
    /// The bounded solver accepts 32-bit packed coefficients, so the
    /// orchestrator works on this truncation and re-checks candidates against
    /// the full-width system afterwards.
    pub fn truncated32(&self) -> Self {
        Self {
            vars: self.vars,
            coeffs: self.coeffs.iter().map(|&c| c & 0xffff_ffff).collect(),
        }
    }
}
