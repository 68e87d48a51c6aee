// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The bounded-solver boundary.
//!
//! The real workhorse is an external native solver (libfes-lite) that
//! searches at most 32 variables on 32-bit packed coefficients. This module
//! pins down its calling convention as the [`BoundedSolver`] trait so the
//! orchestration layer can be driven by the native binding, by the portable
//! [`ExhaustiveSolver`] shipped here, or by a stub in tests.

use log::debug;

use crate::system::{coeff_count, evaluate_words};

/// A solver for quadratic systems in at most 32 variables with 32-bit packed
/// coefficients.
///
/// Implementations must return at most `max_solutions` *distinct* `n`-bit
/// common roots of the packed system. Returning exactly `max_solutions`
/// signals "possibly more exist, truncated" — the caller treats that as an
/// overflow, never as a complete answer.
///
/// `coeffs` follows the layout of [`crate::system`]: `1 + n + n(n-1)/2`
/// words addressed through `idx1`/`idx2`.
pub trait BoundedSolver: Sync {
    fn solve(&self, n: usize, coeffs: &[u32], max_solutions: usize, verbose: bool) -> Vec<u32>;
}

/// Portable reference solver: plain enumeration of all `2^n` assignments.
///
/// Exponentially slower than the native bit-sliced enumeration, but has no
/// build-time dependency; useful as a stand-in, for cross-checking the
/// native solver, and in tests with small `n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

impl BoundedSolver for ExhaustiveSolver {
    fn solve(&self, n: usize, coeffs: &[u32], max_solutions: usize, verbose: bool) -> Vec<u32> {
        assert!(n <= 32, "bounded solver limited to 32 variables, got {}", n);
        assert_eq!(coeffs.len(), coeff_count(n), "coefficient vector shape");

        if verbose {
            debug!("exhaustive solve over {} variables (cap {})", n, max_solutions);
        }

        let wide: Vec<u64> = coeffs.iter().map(|&c| u64::from(c)).collect();
        let mut solutions = Vec::new();
        for x in 0..(1u64 << n) {
            if evaluate_words(n, &wide, x) == 0 {
                solutions.push(x as u32);
                if solutions.len() >= max_solutions {
                    break;
                }
            }
        }

        if verbose {
            debug!("exhaustive solve found {} solution(s)", solutions.len());
        }
        solutions
    }
}
