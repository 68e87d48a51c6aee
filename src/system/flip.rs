// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! In-place elimination of the top variable by complement substitution.

use super::{idx1, idx2, QuadSystem};

/// Substitute `X_{n-1} -> 1 + X_{n-1}` in `coeffs` (laid out for `vars`
/// variables), in place.
///
/// Expanding `X_i * (1 + X_{n-1})` folds the top-variable terms into the
/// constant and linear slots; every slot not mentioning `X_{n-1}` is
/// untouched. Involutive: applying it twice restores the exact bit pattern.
pub(crate) fn flip_top_words(vars: usize, coeffs: &mut [u64]) {
    if vars == 0 {
        return;
    }
    let top = vars - 1;
    coeffs[0] ^= coeffs[idx1(top)];
    for i in 0..top {
        coeffs[idx1(i)] ^= coeffs[idx2(i, top)];
    }
}

impl QuadSystem {
    /// Rewrite the system to represent substituting `X_{n-1} -> 1 + X_{n-1}`.
    ///
    /// Involutive and O(n). After the substitution, truncating to `n - 1`
    /// variables fixes the *original* top variable to 1, just as truncating
    /// the unflipped system fixes it to 0.
    pub fn flip_top(&mut self) {
        flip_top_words(self.vars, &mut self.coeffs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// flip on x2 in: c + x0 + x2 + x0*x2 + x1*x2 (all in packed equation 0)
    #[test]
    fn flip_folds_top_terms_down() {
        let mut f = QuadSystem::zero(3);
        f.xor_linear(0, 1);
        f.xor_linear(2, 1);
        f.xor_quadratic(0, 2, 1);
        f.xor_quadratic(1, 2, 1);

        f.flip_top();

        // constant absorbs coeff(x2); x0, x1 absorb their products with x2
        assert_eq!(f.constant(), 1);
        assert_eq!(f.linear(0), 0); // 1 ^ 1
        assert_eq!(f.linear(1), 1);
        // top-variable slots themselves are untouched
        assert_eq!(f.linear(2), 1);
        assert_eq!(f.quadratic(0, 2), 1);
        assert_eq!(f.quadratic(1, 2), 1);
    }

    #[test]
    fn flip_matches_complemented_evaluation() {
        // evaluate(F_flipped, x) == evaluate(F, x with top bit complemented)
        let n = 5;
        let mut f = QuadSystem::zero(n);
        // an arbitrary fixed system across 3 packed equations
        f.xor_constant(0b110);
        f.xor_linear(1, 0b011);
        f.xor_linear(4, 0b101);
        f.xor_quadratic(0, 4, 0b111);
        f.xor_quadratic(2, 3, 0b010);
        f.xor_quadratic(1, 4, 0b100);

        let mut g = f.clone();
        g.flip_top();

        for x in 0..(1u64 << n) {
            assert_eq!(g.evaluate(x), f.evaluate(x ^ (1 << (n - 1))), "x = {:#b}", x);
        }
    }

    #[test]
    fn flip_is_involutive() {
        let mut f = QuadSystem::zero(4);
        f.xor_constant(0xdead);
        f.xor_linear(3, 0xbeef);
        f.xor_quadratic(1, 3, 0x1234);
        f.xor_quadratic(0, 2, 0x5678);

        let original = f.clone();
        f.flip_top();
        assert_ne!(f, original);
        f.flip_top();
        assert_eq!(f, original);
    }

    #[test]
    fn flip_on_zero_variables_is_a_no_op() {
        let mut f = QuadSystem::zero(0);
        f.xor_constant(7);
        let original = f.clone();
        f.flip_top();
        assert_eq!(f, original);
    }
}
