//! Longest Common Subsequence over the arrows representation.
//!
//! The driver builds an arrow-head tree whose leaf `i` carries the first
//! remaining match column of row `i`, then repeatedly runs the prefix-min
//! cascade. One cascade call folds an entire wave of finalisations — every
//! match `(i, j)` whose column is dominated by the running prefix minimum
//! of the rows above it — into a single tree walk. The wave consumed in
//! round `r` is exactly the set of matches reachable by a chain of length
//! `r`, so the number of waves until the tree drains is the LCS length.

use std::hash::Hash;

use crate::arrows::Arrows;
use crate::error::Result;
use crate::solvers::lis::cordon_longest_chain;
use crate::tree::MinTree;

/// LCS length of `a` and `b`.
///
/// Convenience wrapper: derives the arrows table and runs the cascade
/// driver.
///
/// ```
/// use cordon_dp::solve_lcs;
///
/// assert_eq!(solve_lcs(b"ABCBDAB", b"BDCABA", false, 0), 4);
/// ```
pub fn solve_lcs<T: Eq + Hash>(a: &[T], b: &[T], parallel: bool, granularity: usize) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let arrows = Arrows::from_sequences(a, b);
    solve_lcs_from_arrows(arrows.into_rows(), parallel, granularity)
        .expect("rows built from sequences are strictly increasing")
}

/// LCS length from a prebuilt arrows table.
///
/// Row `i` must list, strictly increasing, the columns matching row `i`.
/// The answer is the number of cascade rounds until every row is
/// exhausted.
pub fn solve_lcs_from_arrows(
    rows: Vec<Vec<usize>>,
    parallel: bool,
    granularity: usize,
) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let mut tree = MinTree::from_arrows(rows, parallel, granularity)?;
    let mut rounds = 0;
    while !tree.is_drained() {
        tree.cascade().expect("tree was built in arrow-head mode");
        rounds += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(rounds, "cascade wave finalised");
    }
    Ok(rounds)
}

/// LCS length via the reduction to LIS on match pairs.
///
/// Matches `(i, j)` are enumerated with `i` ascending and, within a row,
/// `j` descending, so that two matches from the same row can never chain;
/// a strictly dominating pair (`i` and `j` both larger) extends the chain.
/// Kept as a cross-checkable alternative to the cascade driver.
pub fn solve_lcs_as_lis<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    parallel: bool,
    granularity: usize,
) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let arrows = Arrows::from_sequences(a, b);
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (i, row) in arrows.rows().iter().enumerate() {
        for &j in row.iter().rev() {
            pairs.push((i, j));
        }
    }
    cordon_longest_chain(&pairs, parallel, granularity, |p, q| {
        p.0 < q.0 && p.1 < q.1
    })
}
