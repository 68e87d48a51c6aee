// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

use mq_search::system::coeff_count;
use mq_search::{BoundedSolver, QuadSystem};
use rand::Rng;

/// All-ones over the low `bits` bit positions.
pub fn bitmask(bits: usize) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Forge a random quadratic system with a designated root. Returns `(F, X)`.
///
/// Coefficients are drawn uniformly over `n_eqs` packed equations; the
/// constant slot is then set to the residual at `X`, which makes `X` a
/// common root of every packed equation.
pub fn forge_system<R: Rng>(
    rng: &mut R,
    n: usize,
    n_eqs: usize,
    root: Option<u64>,
) -> (QuadSystem, u64) {
    let eq_mask = bitmask(n_eqs);
    let mut coeffs: Vec<u64> = (0..coeff_count(n)).map(|_| rng.gen::<u64>() & eq_mask).collect();
    coeffs[0] = 0;
    let mut f = QuadSystem::from_coeffs(n, coeffs).expect("forged shape is valid");

    let x = root.unwrap_or_else(|| rng.gen::<u64>() & bitmask(n));
    f.xor_constant(f.evaluate(x));
    assert_eq!(f.evaluate(x), 0, "forged system does NOT contain prescribed root");
    (f, x)
}

/// A bounded solver driven by a fixed candidate table.
///
/// Returns, up to the cap, every table entry that actually is a root of the
/// leaf it is asked about. This honors the solver contract exactly while
/// letting tests with more than 32 variables avoid a `2^32` enumeration.
pub struct TableSolver {
    pub candidates: Vec<u32>,
}

impl BoundedSolver for TableSolver {
    fn solve(&self, n: usize, coeffs: &[u32], max_solutions: usize, _verbose: bool) -> Vec<u32> {
        let leaf = QuadSystem::from_coeffs(n, coeffs.iter().map(|&c| u64::from(c)).collect())
            .expect("leaf shape is valid");
        self.candidates
            .iter()
            .map(|&x| x & bitmask(n) as u32)
            .filter(|&x| leaf.evaluate(u64::from(x)) == 0)
            .take(max_solutions)
            .collect()
    }
}
