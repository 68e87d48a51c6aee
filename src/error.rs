// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for system construction and the parallel solve.

use thiserror::Error;

/// Errors surfaced by system construction and [`solve_all`](crate::solve_all).
///
/// Spurious candidates returned by a misbehaving bounded solver are *not*
/// errors: they are filtered out (and logged) during verification, since
/// bit-sliced evaluation is cheap enough to re-check every candidate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Coefficient vector length does not match the stated variable count.
    #[error("coefficient vector for {vars} variables must have {expected} entries, got {got}")]
    ShapeMismatch {
        vars: usize,
        expected: usize,
        got: usize,
    },

    /// More variables than fit in a 64-bit assignment word.
    #[error("system has {vars} variables, at most {max} are supported")]
    TooManyVariables { vars: usize, max: usize },

    /// A leaf's local solve returned exactly the solution cap.
    ///
    /// The true solution count for that leaf may exceed the cap, so
    /// continuing would silently drop solutions. Fatal for the whole call.
    #[error(
        "subsystem (prefix {prefix:#x}, {vars} variables) hit the solution cap {cap}; \
         some solutions may be lost"
    )]
    TooManySolutions { prefix: u64, vars: usize, cap: usize },
}

pub type Result<T> = std::result::Result<T, SolveError>;
