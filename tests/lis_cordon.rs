use cordon_dp::solve_lis;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn naive_lis(seq: &[i64]) -> usize {
    let n = seq.len();
    let mut dp = vec![1usize; n];
    let mut best = 0;
    for i in 0..n {
        for j in 0..i {
            if seq[j] < seq[i] {
                dp[i] = dp[i].max(dp[j] + 1);
            }
        }
        best = best.max(dp[i]);
    }
    best
}

fn patience_lis(seq: &[i64]) -> usize {
    let mut tails: Vec<i64> = Vec::new();
    for &x in seq {
        let pos = tails.partition_point(|&t| t < x);
        if pos == tails.len() {
            tails.push(x);
        } else {
            tails[pos] = x;
        }
    }
    tails.len()
}

#[test]
fn scenario_table() {
    assert_eq!(solve_lis(&[10, 22, 9, 33, 21, 50, 41, 60, 80], false, 0), 6);
    assert_eq!(solve_lis(&[9, 8, 7, 6, 5], false, 0), 1);
    assert_eq!(solve_lis(&[1, 2, 3, 4, 5], false, 0), 5);
}

#[test]
fn empty_input_yields_zero() {
    assert_eq!(solve_lis::<i64>(&[], false, 0), 0);
    assert_eq!(solve_lis::<i64>(&[], true, 1000), 0);
}

#[test]
fn shuffled_permutation_matches_references() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [1usize, 2, 17, 256, 1000] {
        let mut seq: Vec<i64> = (0..n as i64).collect();
        seq.shuffle(&mut rng);
        let got = solve_lis(&seq, false, 0);
        assert_eq!(got, naive_lis(&seq), "n = {n}");
        assert_eq!(got, patience_lis(&seq), "n = {n}");
    }
}

#[test]
fn random_values_with_duplicates_match_naive() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..20 {
        let n = rng.gen_range(0..400);
        let seq: Vec<i64> = (0..n).map(|_| rng.gen_range(-30..30)).collect();
        assert_eq!(solve_lis(&seq, false, 0), naive_lis(&seq));
    }
}

#[test]
fn granularity_never_changes_the_answer() {
    let mut rng = StdRng::seed_from_u64(99);
    let seq: Vec<i64> = (0..600).map(|_| rng.gen_range(0..1000)).collect();
    let baseline = solve_lis(&seq, false, 0);
    for granularity in [0usize, 1, 1000, 50_000] {
        assert_eq!(solve_lis(&seq, true, granularity), baseline);
        assert_eq!(solve_lis(&seq, false, granularity), baseline);
    }
}

// Large shuffled stress against the O(n log n) reference; the quadratic
// round structure makes this a release-mode test.
#[test]
#[ignore = "large stress input; run with --release"]
fn large_shuffle_stress() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut seq: Vec<i64> = (0..100_000).collect();
    seq.shuffle(&mut rng);
    assert_eq!(solve_lis(&seq, true, 5000), patience_lis(&seq));
}

proptest! {
    #[test]
    fn matches_naive_reference(seq in prop::collection::vec(-50i64..50, 0..120)) {
        prop_assert_eq!(solve_lis(&seq, false, 0), naive_lis(&seq));
    }

    #[test]
    fn result_is_deterministic(seq in prop::collection::vec(0i64..20, 0..80)) {
        let first = solve_lis(&seq, false, 0);
        prop_assert_eq!(solve_lis(&seq, false, 0), first);
        prop_assert_eq!(solve_lis(&seq, false, 7), first);
    }
}
