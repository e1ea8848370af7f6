//! Longest Increasing Subsequence via the round-based cordon scheduler.
//!
//! Each round finalises the cordon: the leftmost remaining state whose key
//! is the global minimum. Nothing to its left can still extend it, so its
//! chain length is final. All later unfinalised states that the cordon
//! extends are then relaxed in one parallel pass, and the cordon's leaf is
//! removed from the tree.
//!
//! Removal order is non-decreasing in key value, which is exactly why the
//! scheduler is correct: every strict predecessor of a state is finalised
//! (and has relaxed it) before the state itself is picked.

use crate::tree::{Key, MinTree};

/// Length of the longest strictly increasing subsequence of `seq`.
///
/// `parallel` and `granularity` control task spawning inside the tree
/// build and the relax loop; they never change the result.
///
/// ```
/// use cordon_dp::solve_lis;
///
/// assert_eq!(solve_lis(&[10, 22, 9, 33, 21, 50, 41, 60, 80], false, 0), 6);
/// assert_eq!(solve_lis::<i32>(&[], false, 0), 0);
/// ```
pub fn solve_lis<K: Key>(seq: &[K], parallel: bool, granularity: usize) -> usize {
    cordon_longest_chain(seq, parallel, granularity, |prev, next| prev < next)
}

/// Cordon scheduler over an arbitrary extension predicate.
///
/// `extends(p, q)` must be consistent with the key order in the sense that
/// `extends(p, q)` implies `p < q`; the LCS reduction uses strict
/// dominance on index pairs, `solve_lis` plain strict order.
pub(crate) fn cordon_longest_chain<K, E>(
    seq: &[K],
    parallel: bool,
    granularity: usize,
    extends: E,
) -> usize
where
    K: Key,
    E: Fn(&K, &K) -> bool + Sync,
{
    let n = seq.len();
    if n == 0 {
        return 0;
    }

    let mut tree = MinTree::from_keys(seq, parallel, granularity)
        .expect("sequence was checked to be non-empty");
    let mut chain = vec![1u32; n];
    let mut finalised = vec![false; n];
    let mut longest = 0u32;

    while !tree.is_drained() {
        let cordon = tree.leftmost_min_index();
        let reach = chain[cordon] + 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(cordon, reach, "finalising cordon state");

        relax_tail(
            parallel,
            &seq[cordon],
            &seq[cordon + 1..],
            &mut chain[cordon + 1..],
            &finalised[cordon + 1..],
            reach,
            &extends,
        );

        finalised[cordon] = true;
        longest = longest.max(chain[cordon]);
        tree.remove(cordon).expect("the cordon leaf is live");
    }

    longest as usize
}

/// Relax every unfinalised state after the cordon that the cordon extends.
///
/// Each cell is owned by exactly one task, so the monotone `max` update
/// needs no synchronisation.
#[cfg(feature = "parallel")]
fn relax_tail<K, E>(
    parallel: bool,
    pivot: &K,
    tail: &[K],
    chain: &mut [u32],
    finalised: &[bool],
    reach: u32,
    extends: &E,
) where
    K: Key,
    E: Fn(&K, &K) -> bool + Sync,
{
    if parallel {
        use rayon::prelude::*;
        chain
            .par_iter_mut()
            .zip(tail.par_iter())
            .zip(finalised.par_iter())
            .for_each(|((len, key), done)| {
                if !*done && extends(pivot, key) {
                    *len = (*len).max(reach);
                }
            });
    } else {
        relax_tail_serial(pivot, tail, chain, finalised, reach, extends);
    }
}

#[cfg(not(feature = "parallel"))]
fn relax_tail<K, E>(
    parallel: bool,
    pivot: &K,
    tail: &[K],
    chain: &mut [u32],
    finalised: &[bool],
    reach: u32,
    extends: &E,
) where
    K: Key,
    E: Fn(&K, &K) -> bool + Sync,
{
    let _ = parallel;
    relax_tail_serial(pivot, tail, chain, finalised, reach, extends);
}

fn relax_tail_serial<K, E>(
    pivot: &K,
    tail: &[K],
    chain: &mut [u32],
    finalised: &[bool],
    reach: u32,
    extends: &E,
) where
    K: Key,
    E: Fn(&K, &K) -> bool,
{
    for ((len, key), done) in chain.iter_mut().zip(tail).zip(finalised) {
        if !*done && extends(pivot, key) {
            *len = (*len).max(reach);
        }
    }
}
