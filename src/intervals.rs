//! Run-length-compressed decision intervals.
//!
//! The convex GLWS solver keeps, for every unfinalised state, the best
//! predecessor found so far. Because the cost is Monge, the mapping from
//! state to best predecessor is piecewise constant, so it is stored as an
//! ordered list of disjoint intervals: `{l, r, j}` means "for every state
//! `i` in `[l, r]` the current best predecessor is `j`".

/// One entry of the compressed decision list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Inclusive first state covered by this entry.
    pub l: usize,
    /// Inclusive last state covered by this entry.
    pub r: usize,
    /// Best predecessor for every state in `[l, r]`.
    pub j: usize,
}

/// Look up the best predecessor recorded for state `i`.
///
/// A linear scan suffices: the list stays short (typically `O(log n)`
/// entries) across rounds. States not covered by any entry fall back to
/// predecessor 0.
#[inline]
pub fn find_best(i: usize, decisions: &[Interval]) -> usize {
    decisions
        .iter()
        .find(|iv| iv.l <= i && i <= iv.r)
        .map(|iv| iv.j)
        .unwrap_or(0)
}

/// Merge adjacent entries that share a predecessor and abut exactly.
///
/// Single pass; the output never contains two consecutive entries with the
/// same `j` covering contiguous ranges.
pub fn compact(entries: Vec<Interval>) -> Vec<Interval> {
    let mut out: Vec<Interval> = Vec::with_capacity(entries.len());
    for entry in entries {
        match out.last_mut() {
            Some(last) if last.j == entry.j && entry.l == last.r + 1 => last.r = entry.r,
            _ => out.push(entry),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{compact, find_best, Interval};

    #[test]
    fn lookup_hits_covering_entry() {
        let decisions = vec![
            Interval { l: 1, r: 3, j: 0 },
            Interval { l: 4, r: 9, j: 2 },
        ];
        assert_eq!(find_best(1, &decisions), 0);
        assert_eq!(find_best(3, &decisions), 0);
        assert_eq!(find_best(4, &decisions), 2);
        assert_eq!(find_best(9, &decisions), 2);
    }

    #[test]
    fn lookup_falls_back_to_zero() {
        assert_eq!(find_best(7, &[]), 0);
    }

    #[test]
    fn compaction_joins_abutting_runs() {
        let merged = compact(vec![
            Interval { l: 1, r: 2, j: 0 },
            Interval { l: 3, r: 5, j: 0 },
            Interval { l: 6, r: 6, j: 4 },
            Interval { l: 7, r: 8, j: 4 },
            Interval { l: 9, r: 9, j: 0 },
        ]);
        assert_eq!(
            merged,
            vec![
                Interval { l: 1, r: 5, j: 0 },
                Interval { l: 6, r: 8, j: 4 },
                Interval { l: 9, r: 9, j: 0 },
            ]
        );
    }

    #[test]
    fn compaction_keeps_gapped_runs_apart() {
        let entries = vec![
            Interval { l: 1, r: 2, j: 0 },
            Interval { l: 5, r: 6, j: 0 },
        ];
        assert_eq!(compact(entries.clone()), entries);
    }
}
