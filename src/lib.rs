// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive search for common roots of multivariate quadratic systems over GF(2).
//!
//! A bounded brute-force solver (libfes-lite, or the portable
//! [`ExhaustiveSolver`] shipped here) can search at most 32 variables at a
//! time, on coefficients packed 32 equations to a word. This crate is the
//! layer that extends such a solver to larger systems: it splits off the top
//! `n - 32` variables by exact algebraic case analysis, solves the resulting
//! independent 32-variable leaf subsystems in parallel, and lifts the local
//! answers back to validated n-bit solutions of the original system.
//!
//! # Architecture
//!
//! The crate is organised around one data type and three operations:
//!
//! - [`QuadSystem`]: a quadratic system in `n` variables as a flat
//!   coefficient vector, bit-sliced so that bit `b` of every coefficient
//!   belongs to packed equation `b` (up to 64 equations per system).
//! - **Evaluation** ([`QuadSystem::evaluate`]): the residual bit-vector of
//!   the system at an assignment; used to verify everything the solver and
//!   the decomposition produce.
//! - **Decomposition** ([`decompose`] / [`Decomposer`]): a depth-first
//!   traversal that fixes the top variable to 0 (truncation) or 1 (in-place
//!   involutive substitution via [`QuadSystem::flip_top`], undone on
//!   backtracking) until at most 32 variables remain, yielding one
//!   [`Leaf`] per assignment of the fixed variables.
//! - **Orchestration** ([`solve_all`]): dispatches the leaves across a rayon
//!   worker pool, calls the [`BoundedSolver`] on each, and lifts, verifies
//!   and aggregates the surviving solutions.
//!
//! # Parallelization
//!
//! Decomposition is strictly sequential: the traversal mutates one private
//! working buffer between yields. Leaves, on the other hand, are owned
//! immutable snapshots, so [`solve_all`] materializes all of them first and
//! then solves them on the rayon pool with no shared state beyond result
//! aggregation. A leaf whose local solve hits the solution cap aborts the
//! whole call, since its true solution count may exceed the cap.
//!
//! # Example
//!
//! ```
//! use mq_search::{solve_all, ExhaustiveSolver, QuadSystem, SolveOptions};
//!
//! // x0 * x1 = 1 (single packed equation, in bit 0)
//! let mut f = QuadSystem::zero(2);
//! f.xor_quadratic(0, 1, 1);
//! f.xor_constant(1);
//!
//! let solutions = solve_all(&f, &ExhaustiveSolver, &SolveOptions::default()).unwrap();
//! assert_eq!(solutions, vec![0b11]);
//! ```

pub mod decompose;
pub mod error;
pub mod solve;
pub mod solver;
pub mod system;

// Re-export commonly used types
pub use decompose::{decompose, Decomposer, Leaf};
pub use error::SolveError;
pub use solve::{solve_all, SolveOptions};
pub use solver::{BoundedSolver, ExhaustiveSolver};
pub use system::QuadSystem;
