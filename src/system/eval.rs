// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Naive bit-sliced evaluation.
//!
//! Used to verify everything the solver and the decomposition produce; not a
//! hot path. The bounded solver does its own (much faster) enumeration.

use super::{idx1, idx2, QuadSystem};

/// Evaluate `coeffs` (laid out for `vars` variables) at assignment `x`.
///
/// Per variable, the assignment bit is broadcast to an all-ones or all-zero
/// mask, and the constant, linear and quadratic terms are XOR-folded under
/// those masks. Bits of `x` at positions `vars` and above are ignored.
pub(crate) fn evaluate_words(vars: usize, coeffs: &[u64], x: u64) -> u64 {
    debug_assert_eq!(coeffs.len(), super::coeff_count(vars));

    // Broadcast each assignment bit across the packed-equation word.
    let mut masks = [0u64; super::MAX_VARS];
    for (i, mask) in masks.iter_mut().enumerate().take(vars) {
        *mask = if (x >> i) & 1 == 1 { u64::MAX } else { 0 };
    }

    let mut residual = coeffs[0];
    for j in 0..vars {
        let vj = masks[j];
        residual ^= coeffs[idx1(j)] & vj;
        for i in 0..j {
            residual ^= coeffs[idx2(i, j)] & vj & masks[i];
        }
    }
    residual
}

impl QuadSystem {
    /// Residual of the system at assignment `x`.
    ///
    /// Bit `b` of the result is 1 iff packed equation `b` is *unsatisfied*
    /// at `x`; a return value of 0 means `x` is a common root. Pure, O(n²).
    pub fn evaluate(&self, x: u64) -> u64 {
        evaluate_words(self.vars, &self.coeffs, x)
    }
}
