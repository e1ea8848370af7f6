use cordon_dp::{solve_lcs, solve_lcs_as_lis, solve_lcs_from_arrows, Arrows, Error};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn naive_lcs<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let m = b.len();
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];
    for x in a {
        for j in 1..=m {
            curr[j] = if *x == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

#[test]
fn scenario_table() {
    assert_eq!(solve_lcs(b"ABCBDAB", b"BDCABA", false, 0), 4);
    assert_eq!(
        solve_lcs(&[1, 3, 4, 1, 2, 3], &[3, 4, 1, 2, 1, 3], false, 0),
        5
    );
    assert_eq!(
        solve_lcs_from_arrows(vec![vec![0], vec![1], vec![2]], false, 0).unwrap(),
        3
    );
}

#[test]
fn empty_sides_yield_zero() {
    assert_eq!(solve_lcs::<u8>(b"", b"BDCABA", false, 0), 0);
    assert_eq!(solve_lcs::<u8>(b"ABCBDAB", b"", false, 0), 0);
    assert_eq!(solve_lcs::<u8>(b"", b"", false, 0), 0);
}

#[test]
fn identical_sequences_match_fully() {
    let s = b"AGGTAB";
    assert_eq!(solve_lcs(s, s, false, 0), s.len());
}

#[test]
fn unsorted_arrow_rows_are_invalid_input() {
    assert_eq!(
        solve_lcs_from_arrows(vec![vec![0, 3], vec![5, 2]], false, 0),
        Err(Error::UnsortedArrows { row: 1, pos: 1 })
    );
}

#[test]
fn arrows_round_trip_matches_direct_solve() {
    let a = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";
    let b = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let rows = Arrows::from_sequences(a, b).into_rows();
    assert_eq!(
        solve_lcs_from_arrows(rows, false, 0).unwrap(),
        naive_lcs(a, b)
    );
}

#[test]
fn seeded_random_inputs_match_naive() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let n = rng.gen_range(0..300);
        let m = rng.gen_range(0..300);
        let a: Vec<u8> = (0..n).map(|_| rng.gen_range(b'0'..b'9')).collect();
        let b: Vec<u8> = (0..m).map(|_| rng.gen_range(b'0'..b'9')).collect();
        assert_eq!(solve_lcs(&a, &b, false, 0), naive_lcs(&a, &b));
    }
}

#[test]
fn granularity_never_changes_the_answer() {
    let mut rng = StdRng::seed_from_u64(5);
    let a: Vec<u8> = (0..400).map(|_| rng.gen_range(b'A'..b'E')).collect();
    let b: Vec<u8> = (0..400).map(|_| rng.gen_range(b'A'..b'E')).collect();
    let baseline = solve_lcs(&a, &b, false, 0);
    for granularity in [0usize, 1, 1000, 50_000] {
        assert_eq!(solve_lcs(&a, &b, true, granularity), baseline);
    }
}

proptest! {
    #[test]
    fn matches_naive_reference(a in "[ACGT]{0,40}", b in "[ACGT]{0,40}") {
        let a = a.as_bytes();
        let b = b.as_bytes();
        prop_assert_eq!(solve_lcs(a, b, false, 0), naive_lcs(a, b));
    }

    #[test]
    fn reduction_agrees_with_cascade(a in "[ACGT]{0,25}", b in "[ACGT]{0,25}") {
        let a = a.as_bytes();
        let b = b.as_bytes();
        prop_assert_eq!(
            solve_lcs_as_lis(a, b, false, 0),
            solve_lcs(a, b, false, 0)
        );
    }

    #[test]
    fn integer_alphabets_match_naive(
        a in prop::collection::vec(0i64..6, 0..40),
        b in prop::collection::vec(0i64..6, 0..40),
    ) {
        prop_assert_eq!(solve_lcs(&a, &b, false, 0), naive_lcs(&a, &b));
    }
}
