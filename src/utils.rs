//! Small helpers shared by the solvers.

/// Granularity used by callers that do not want to tune task sizes, e.g.
/// the DSL dispatch.
pub const DEFAULT_GRANULARITY: usize = 5000;

/// Whether a divide-and-conquer step over `width` states should spawn its
/// two halves as parallel tasks.
///
/// A granularity of zero disables spawning entirely.
#[inline]
pub(crate) fn should_spawn(parallel: bool, granularity: usize, width: usize) -> bool {
    parallel && granularity > 0 && width > granularity
}

/// Run two closures, in parallel when `parallel` holds, joining before
/// returning.
#[cfg(feature = "parallel")]
pub(crate) fn join_if<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

/// Serial fallback used when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub(crate) fn join_if<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    let _ = parallel;
    (a(), b())
}

#[cfg(test)]
mod tests {
    use super::should_spawn;

    #[test]
    fn zero_granularity_never_spawns() {
        assert!(!should_spawn(true, 0, 1_000_000));
    }

    #[test]
    fn spawns_only_above_granularity() {
        assert!(!should_spawn(true, 100, 100));
        assert!(should_spawn(true, 100, 101));
        assert!(!should_spawn(false, 100, 101));
    }
}
