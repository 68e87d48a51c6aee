// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Case-splitting decomposition into 32-variable leaf subsystems.
//!
//! A system in `n > 32` variables is reduced to `2^(n-32)` independent
//! systems in exactly 32 variables by fixing the top `n - 32` variables to
//! every combination of values. Fixing the top variable of an `m`-variable
//! system is cheap in the bit-sliced layout:
//!
//! - **to 0**: truncate the coefficient vector to `coeff_count(m - 1)` slots;
//!   every term mentioning `X_{m-1}` lives in a dropped slot, so no mutation
//!   is needed;
//! - **to 1**: substitute `X_{m-1} -> 1 + X_{m-1}` in place with
//!   [`QuadSystem::flip_top`], then truncate as above. The substitution is
//!   involutive, so applying it again on the way back up restores the buffer
//!   for the parent.
//!
//! This gives a depth-first traversal of a binary tree of depth `n - 32`
//! over one working buffer, at O(m) mutation per branch switch instead of an
//! O(m²) copy per node.
//!
//! # Execution model
//!
//! The traversal is expressed as an explicit stack machine rather than
//! recursion. Each pending node carries one of three states:
//!
//! 1. `Fresh`: not yet expanded; expand the low child (truncate only)
//! 2. `Half`: low subtree done; flip the top variable and expand the high child
//! 3. `Full`: both subtrees done; flip again to undo, return to the parent
//!
//! The working buffer is a private copy taken at construction, so consuming
//! a [`Decomposer`] partially can never corrupt the caller's system; the
//! only cost of an early stop is the wasted clone.
//!
//! # Examples
//!
//! ```
//! use mq_search::{decompose, QuadSystem};
//!
//! let f = QuadSystem::zero(35);
//! let leaves = decompose(&f);
//! assert_eq!(leaves.len(), 8); // 2^(35-32)
//! assert!(leaves.iter().all(|leaf| leaf.system.vars() == 32));
//! ```

use crate::system::{coeff_count, QuadSystem};

/// Variable count the bounded solver can handle; leaves never exceed it.
pub const LEAF_VARS: usize = 32;

/// One subsystem produced by fixing the top `n - 32` variables.
///
/// If `y` is a solution of `system`, then `y + (prefix << 32)` is a solution
/// of the system the decomposition started from (modulo the packed-equation
/// width kept in `system`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Values of the fixed variables, most significant bit = the choice made
    /// nearest the root (the original top variable).
    pub prefix: u64,

    /// Owned truncated snapshot in at most [`LEAF_VARS`] variables.
    pub system: QuadSystem,
}

/// Traversal state of one pending node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    /// Not yet expanded.
    Fresh,
    /// Low child done, about to eliminate and expand the high child.
    Half,
    /// Both children done, about to undo the elimination and return upward.
    Full,
}

/// Stack entry tracking one pending node of the case-split tree.
#[derive(Debug, Clone, Copy)]
struct Frame {
    state: NodeState,
    /// Branch choices accumulated from the root down to this node.
    prefix: u64,
    /// Variable count of the subsystem at this node.
    vars: usize,
}

/// Lazy depth-first enumeration of all leaf subsystems.
///
/// Finite iterator over [`Leaf`] values: exactly one leaf for `n <= 32`
/// (prefix 0, system unchanged), otherwise `2^(n-32)` leaves whose prefixes
/// cover `[0, 2^(n-32))` exactly once, in increasing order.
///
/// Decomposition is strictly sequential; parallelism belongs at the leaf
/// level, once the leaves are materialized (see [`crate::solve_all`]).
#[derive(Debug)]
pub struct Decomposer {
    /// Private working copy, shared by the whole traversal and mutated in
    /// place between yields.
    work: Vec<u64>,

    /// Pending nodes, deepest on top.
    stack: Vec<Frame>,
}

impl Decomposer {
    /// Start a decomposition of `system`.
    ///
    /// Clones the coefficient vector once; the traversal itself allocates
    /// only the leaf snapshots it yields.
    pub fn new(system: &QuadSystem) -> Self {
        Self {
            work: system.coeffs().to_vec(),
            stack: vec![Frame {
                state: NodeState::Fresh,
                prefix: 0,
                vars: system.vars(),
            }],
        }
    }
}

impl Iterator for Decomposer {
    type Item = Leaf;

    fn next(&mut self) -> Option<Leaf> {
        while let Some(frame) = self.stack.pop() {
            if frame.vars <= LEAF_VARS {
                let system =
                    QuadSystem::from_parts(frame.vars, self.work[..coeff_count(frame.vars)].to_vec());
                return Some(Leaf {
                    prefix: frame.prefix,
                    system,
                });
            }
            match frame.state {
                NodeState::Fresh => {
                    // Low child first: fixing the top variable to 0 is pure
                    // truncation, the buffer stays as the parent left it.
                    self.stack.push(Frame {
                        state: NodeState::Half,
                        ..frame
                    });
                    self.stack.push(Frame {
                        state: NodeState::Fresh,
                        prefix: frame.prefix << 1,
                        vars: frame.vars - 1,
                    });
                }
                NodeState::Half => {
                    // High child: materialize the substitution X_top -> 1 + X_top.
                    self.stack.push(Frame {
                        state: NodeState::Full,
                        ..frame
                    });
                    crate::system::flip_top_words(frame.vars, &mut self.work);
                    self.stack.push(Frame {
                        state: NodeState::Fresh,
                        prefix: (frame.prefix << 1) | 1,
                        vars: frame.vars - 1,
                    });
                }
                NodeState::Full => {
                    // Undo the substitution; the parent expects its own buffer.
                    crate::system::flip_top_words(frame.vars, &mut self.work);
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Decomposer {}

/// Materialize every leaf subsystem of `system`.
///
/// Equivalent to `Decomposer::new(system).collect()`. For `n > 32` this is
/// `2^(n-32)` owned leaves; callers splitting very wide systems should
/// budget accordingly or drive the [`Decomposer`] iterator directly.
pub fn decompose(system: &QuadSystem) -> Vec<Leaf> {
    Decomposer::new(system).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixed, not-too-symmetric system for the traversal tests.
    fn sample_system(n: usize) -> QuadSystem {
        let mut f = QuadSystem::zero(n);
        f.xor_constant(0b1001);
        for i in 0..n {
            f.xor_linear(i, (0x9e37_79b9_7f4a_7c15u64).rotate_left(i as u32));
            for j in 0..i {
                f.xor_quadratic(j, i, (i as u64 * 37 + j as u64 * 11) | 1);
            }
        }
        f
    }

    #[test]
    fn small_system_is_its_own_single_leaf() {
        let f = sample_system(24);
        let leaves = decompose(&f);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].prefix, 0);
        assert_eq!(leaves[0].system, f);
    }

    #[test]
    fn leaf_count_and_prefix_coverage() {
        let f = sample_system(34);
        let leaves = decompose(&f);
        assert_eq!(leaves.len(), 4);
        let prefixes: Vec<u64> = leaves.iter().map(|leaf| leaf.prefix).collect();
        assert_eq!(prefixes, vec![0, 1, 2, 3]);
        assert!(leaves.iter().all(|leaf| leaf.system.vars() == LEAF_VARS));
    }

    #[test]
    fn working_buffer_is_restored_after_full_drainage() {
        let f = sample_system(36);
        let mut decomposer = Decomposer::new(&f);
        let count = decomposer.by_ref().count();
        assert_eq!(count, 16);
        assert_eq!(decomposer.work, f.coeffs());
    }

    #[test]
    fn leaves_embed_into_the_original_system() {
        // evaluate(G, x) == evaluate(F, x + (prefix << 32)) for every leaf.
        let f = sample_system(34);
        for leaf in decompose(&f) {
            for x in [0u64, 1, 0xffff_ffff, 0x8000_0001, 0x1234_5678] {
                assert_eq!(
                    leaf.system.evaluate(x),
                    f.evaluate(x + (leaf.prefix << 32)),
                    "prefix {} x {:#x}",
                    leaf.prefix,
                    x
                );
            }
        }
    }

    #[test]
    fn partial_consumption_leaves_the_input_untouched() {
        let f = sample_system(35);
        let original = f.clone();
        let mut decomposer = Decomposer::new(&f);
        decomposer.next();
        decomposer.next();
        drop(decomposer);
        assert_eq!(f, original);
    }

    #[test]
    fn zero_variable_system_yields_one_empty_leaf() {
        let f = {
            let mut f = QuadSystem::zero(0);
            f.xor_constant(5);
            f
        };
        let leaves = decompose(&f);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].prefix, 0);
        assert_eq!(leaves[0].system.vars(), 0);
        assert_eq!(leaves[0].system.constant(), 5);
    }
}
