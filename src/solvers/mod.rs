//! The three cordon solvers.
//!
//! Each module wires the shared engine pieces (prefix-minimum tree,
//! cordon rounds, decision intervals) to one problem:
//! - [`lis`]  : Longest Increasing Subsequence.
//! - [`lcs`]  : Longest Common Subsequence over the arrows representation.
//! - [`glws`] : Convex Generalized Least-Weight Subsequence.

pub mod glws;
pub mod lcs;
pub mod lis;
