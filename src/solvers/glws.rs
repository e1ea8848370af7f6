//! Convex Generalized Least-Weight Subsequence.
//!
//! Computes `D[n]` for `D[i] = min over j < i of D[j] + cost(j, i)` where
//! `cost` satisfies the inverse quadrangle inequality (convex Monge). The
//! Monge property makes the best-predecessor function monotone in `i`,
//! which the solver exploits twice:
//!
//! - the compressed decision list `B` stores best predecessors as
//!   run-length intervals, rebuilt per round by a SMAWK-style midpoint
//!   recursion;
//! - once the cordon — the first state improvable by an unfinalised
//!   predecessor — is known, every state before it is final, and every
//!   state from the cordon on has its best predecessor inside the freshly
//!   finalised window, so the old decision tail can be replaced wholesale.
//!
//! The cordon itself is located by probing exponentially growing windows
//! beyond the finalised prefix, each candidate scanning forward for the
//! first state it improves.

use crate::intervals::{compact, find_best, Interval};
use crate::utils::join_if;

/// Width below which the decision-interval recursion stops spawning
/// tasks.
const INTERVAL_TASK_WIDTH: usize = 20;

/// Minimum total cost of reaching state `n` over `data` of length `n`.
///
/// `cost(j, i, data)` prices the decision "state `i` is reached from state
/// `j`", covering the half-open element range `data[j..i]`; it must be
/// convex Monge for the result to be meaningful. A violation yields a
/// wrong answer, never unsafety.
pub fn solve_convex_glws<C>(data: &[f64], cost: C, parallel: bool, granularity: usize) -> f64
where
    C: Fn(usize, usize, &[f64]) -> f64 + Sync,
{
    let n = data.len();
    if n == 0 {
        return 0.0;
    }

    let mut dist = vec![f64::INFINITY; n + 1];
    dist[0] = 0.0;
    let mut decisions = vec![Interval { l: 1, r: n, j: 0 }];
    let mut now = 0;
    // The window loops are flat parallel-fors governed by `parallel`
    // alone; `granularity` gates recursive task spawning, here only in
    // the compressor.
    let spawn_tasks = parallel && granularity > 0;

    while now < n {
        let cordon = find_cordon(now, n, &dist, &decisions, &cost, data, parallel);

        #[cfg(feature = "tracing")]
        tracing::trace!(now, cordon, "advancing cordon window");

        finalise_window(parallel, now, cordon, &mut dist, &decisions, &cost, data);

        if cordon <= n {
            let fresh = find_intervals(
                now + 1,
                cordon - 1,
                cordon,
                n,
                &dist,
                &cost,
                data,
                spawn_tasks,
            );
            decisions.retain(|iv| iv.r < cordon);
            decisions.extend(fresh);
            decisions = compact(decisions);
        }

        now = cordon - 1;
    }

    dist[n]
}

/// Locate the next cordon: the smallest state that some unfinalised
/// predecessor improves, or `n + 1` if none exists.
///
/// Probes windows of doubling width past `now`. The loop may stop as soon
/// as the best candidate found lies within one past the probed range:
/// any unprobed `j` can only improve states after itself.
#[allow(clippy::too_many_arguments)]
fn find_cordon<C>(
    now: usize,
    n: usize,
    dist: &[f64],
    decisions: &[Interval],
    cost: &C,
    data: &[f64],
    parallel: bool,
) -> usize
where
    C: Fn(usize, usize, &[f64]) -> f64 + Sync,
{
    let mut cordon = n + 1;
    let mut lo = now + 1;
    let mut width = 1;
    loop {
        let hi = n.min(lo + width - 1);
        let window_min = probe_window(parallel, lo, hi, n, dist, decisions, cost, data);
        cordon = cordon.min(window_min);
        if cordon <= hi + 1 || hi == n {
            return cordon;
        }
        lo = hi + 1;
        width *= 2;
    }
}

/// Smallest state beyond `j` that `j`'s tentative value would improve.
fn first_improvement<C>(
    j: usize,
    n: usize,
    dist: &[f64],
    decisions: &[Interval],
    cost: &C,
    data: &[f64],
) -> usize
where
    C: Fn(usize, usize, &[f64]) -> f64,
{
    let b = find_best(j, decisions);
    let via = dist[b] + cost(b, j, data);
    for i in (j + 1)..=n {
        let bi = find_best(i, decisions);
        if via + cost(j, i, data) < dist[bi] + cost(bi, i, data) {
            return i;
        }
    }
    n + 1
}

#[cfg(feature = "parallel")]
#[allow(clippy::too_many_arguments)]
fn probe_window<C>(
    parallel: bool,
    lo: usize,
    hi: usize,
    n: usize,
    dist: &[f64],
    decisions: &[Interval],
    cost: &C,
    data: &[f64],
) -> usize
where
    C: Fn(usize, usize, &[f64]) -> f64 + Sync,
{
    if parallel {
        use rayon::prelude::*;
        (lo..=hi)
            .into_par_iter()
            .map(|j| first_improvement(j, n, dist, decisions, cost, data))
            .min()
            .unwrap_or(n + 1)
    } else {
        probe_window_serial(lo, hi, n, dist, decisions, cost, data)
    }
}

#[cfg(not(feature = "parallel"))]
#[allow(clippy::too_many_arguments)]
fn probe_window<C>(
    parallel: bool,
    lo: usize,
    hi: usize,
    n: usize,
    dist: &[f64],
    decisions: &[Interval],
    cost: &C,
    data: &[f64],
) -> usize
where
    C: Fn(usize, usize, &[f64]) -> f64 + Sync,
{
    let _ = parallel;
    probe_window_serial(lo, hi, n, dist, decisions, cost, data)
}

#[allow(clippy::too_many_arguments)]
fn probe_window_serial<C>(
    lo: usize,
    hi: usize,
    n: usize,
    dist: &[f64],
    decisions: &[Interval],
    cost: &C,
    data: &[f64],
) -> usize
where
    C: Fn(usize, usize, &[f64]) -> f64,
{
    (lo..=hi)
        .map(|j| first_improvement(j, n, dist, decisions, cost, data))
        .min()
        .unwrap_or(n + 1)
}

/// Finalise `dist[now+1 ..= cordon-1]` from the recorded best
/// predecessors. Every predecessor is in the finalised prefix, so the
/// window cells can be written independently.
fn finalise_window<C>(
    parallel: bool,
    now: usize,
    cordon: usize,
    dist: &mut [f64],
    decisions: &[Interval],
    cost: &C,
    data: &[f64],
) where
    C: Fn(usize, usize, &[f64]) -> f64 + Sync,
{
    let n = dist.len() - 1;
    let end = cordon.min(n + 1);
    let (prefix, tail) = dist.split_at_mut(now + 1);
    let prefix: &[f64] = prefix;
    let window = &mut tail[..end - now - 1];

    let write = |(k, cell): (usize, &mut f64)| {
        let i = now + 1 + k;
        let b = find_best(i, decisions);
        *cell = prefix[b] + cost(b, i, data);
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            window.par_iter_mut().enumerate().for_each(write);
        } else {
            window.iter_mut().enumerate().for_each(write);
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        let _ = parallel;
        window.iter_mut().enumerate().for_each(write);
    }
}

/// SMAWK-style decision-interval compressor.
///
/// For states `il..=ir` and candidate predecessors `jl..=jr`, finds the
/// best candidate at the midpoint by linear scan; Monge convexity confines
/// the best candidates of the left half to `[jl, best]` and of the right
/// half to `[best, jr]`, so the two halves recurse independently.
#[allow(clippy::too_many_arguments)]
fn find_intervals<C>(
    jl: usize,
    jr: usize,
    il: usize,
    ir: usize,
    dist: &[f64],
    cost: &C,
    data: &[f64],
    parallel: bool,
) -> Vec<Interval>
where
    C: Fn(usize, usize, &[f64]) -> f64 + Sync,
{
    if il > ir {
        return Vec::new();
    }

    let im = (il + ir) / 2;
    let mut best = jl;
    let mut best_value = dist[jl] + cost(jl, im, data);
    for j in jl + 1..=jr {
        let value = dist[j] + cost(j, im, data);
        if value < best_value {
            best_value = value;
            best = j;
        }
    }

    let (mut left, right) = join_if(
        parallel && ir - il > INTERVAL_TASK_WIDTH,
        || find_intervals(jl, best, il, im - 1, dist, cost, data, parallel),
        || find_intervals(best, jr, im + 1, ir, dist, cost, data, parallel),
    );

    left.push(Interval {
        l: im,
        r: im,
        j: best,
    });
    left.extend(right);
    left
}
