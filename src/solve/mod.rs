// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parallel orchestration: decompose, dispatch, lift, validate.
//!
//! [`solve_all`] is the top-level entry point. It truncates the system to the
//! 32 packed equations the bounded solver can see, materializes every leaf
//! subsystem (decomposition is sequential, see [`crate::decompose`]), solves
//! the leaves on the rayon worker pool, and lifts each local solution back to
//! an n-bit candidate that must survive two checks: the truncated system in
//! full, then the original untruncated system.
//!
//! # Failure policy
//!
//! A leaf whose local solve returns exactly the solution cap aborts the whole
//! call with [`SolveError::TooManySolutions`]: its true solution count may
//! exceed the cap, and returning a partial result silently would drop
//! solutions. A candidate the solver returns that does not actually satisfy
//! its leaf is the opposite case: an expected nuisance of a bit-sliced
//! backend, logged at `warn` level and filtered out.

use log::{debug, warn};
use rayon::prelude::*;

use crate::decompose::{decompose, Leaf};
use crate::error::SolveError;
use crate::solver::BoundedSolver;
use crate::system::QuadSystem;

/// Tuning knobs for [`solve_all`].
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Per-leaf solution cap handed to the bounded solver. A leaf reaching
    /// this cap is treated as an overflow and fails the whole call.
    pub max_local_solutions: usize,

    /// Forwarded to the bounded solver's verbosity flag.
    pub verbose: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_local_solutions: 256,
            verbose: false,
        }
    }
}

/// Find every common root of `system`, in parallel.
///
/// Returns the full solution set as n-bit assignment words, in no guaranteed
/// order. Every returned `y` satisfies `system.evaluate(y) == 0`.
///
/// # Errors
///
/// [`SolveError::TooManySolutions`] if any leaf's local solve hits
/// `options.max_local_solutions`; no partial result is returned.
///
/// # Panics
///
/// Panics if `options.max_local_solutions` is zero.
pub fn solve_all<S: BoundedSolver>(
    system: &QuadSystem,
    solver: &S,
    options: &SolveOptions,
) -> Result<Vec<u64>, SolveError> {
    assert!(options.max_local_solutions > 0, "solution cap must be positive");

    // The bounded solver only sees 32-bit packed coefficients; candidates are
    // re-checked against the untruncated system after lifting.
    let truncated = system.truncated32();
    let leaves = decompose(&truncated);
    debug!(
        "solving {} variables as {} leaf subsystem(s)",
        system.vars(),
        leaves.len()
    );

    // Leaves are owned and independent; any overflow short-circuits the pool.
    let per_leaf: Vec<Vec<u64>> = leaves
        .par_iter()
        .map(|leaf| solve_leaf(leaf, solver, options))
        .collect::<Result<_, _>>()?;

    let mut solutions = Vec::new();
    for lifted in per_leaf {
        for y in lifted {
            if truncated.evaluate(y) != 0 {
                // The leaf already verified its low bits; failing here means
                // the decomposition and the system disagree.
                warn!("lifted candidate {:#x} fails the truncated system, dropped", y);
                continue;
            }
            // The first 32 packed equations hold; keep y only if the
            // remaining ones do too.
            if system.evaluate(y) == 0 {
                solutions.push(y);
            }
        }
    }
    debug!("{} solution(s) survived validation", solutions.len());
    Ok(solutions)
}

/// Solve one leaf and lift its local solutions by the leaf's prefix.
fn solve_leaf<S: BoundedSolver>(
    leaf: &Leaf,
    solver: &S,
    options: &SolveOptions,
) -> Result<Vec<u64>, SolveError> {
    let vars = leaf.system.vars();
    let words: Vec<u32> = leaf.system.coeffs().iter().map(|&c| c as u32).collect();
    let local = solver.solve(vars, &words, options.max_local_solutions, options.verbose);

    if local.len() >= options.max_local_solutions {
        return Err(SolveError::TooManySolutions {
            prefix: leaf.prefix,
            vars,
            cap: options.max_local_solutions,
        });
    }

    let mut lifted = Vec::with_capacity(local.len());
    for x in local {
        // Defensive re-check; a candidate that fails its own leaf indicates
        // a solver defect.
        if leaf.system.evaluate(u64::from(x)) != 0 {
            warn!(
                "solver returned non-root {:#x} for leaf (prefix {:#x}, {} vars), dropped",
                x, leaf.prefix, vars
            );
            continue;
        }
        lifted.push(u64::from(x) + (leaf.prefix << 32));
    }
    Ok(lifted)
}
