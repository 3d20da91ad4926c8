//! Every walk is a permutation of the region.

use proptest::prelude::*;
use sympathy::{Geometry, Stride, Walk};

/// Greatest common divisor, for building coprime increments.
fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// `(page_words, pages, increment)` with the increment coprime to both the
/// page and the region word counts.
fn geometry_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..=64, 1usize..=16, 1usize..=10_000).prop_filter_map(
        "increment must be coprime with page and region",
        |(page_words, pages, increment)| {
            let total = page_words * pages;
            (gcd(increment, page_words) == 1 && gcd(increment, total) == 1)
                .then_some((page_words, pages, increment))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn every_stride_is_a_permutation((page_words, pages, increment) in geometry_strategy()) {
        let geometry = Geometry::new(page_words * pages, page_words, increment).unwrap();
        for stride in Stride::ALL {
            let walk = Walk::new(stride, geometry).unwrap();
            let mut seen = vec![false; geometry.array_words()];
            for pos in walk.positions() {
                prop_assert!(pos < seen.len(), "{} left the region at {}", stride, pos);
                prop_assert!(!seen[pos], "{} visited {} twice", stride, pos);
                seen[pos] = true;
            }
            prop_assert!(seen.iter().all(|s| *s), "{} missed a position", stride);
        }
    }

    #[test]
    fn random_page_never_crosses_a_page_early((page_words, pages, increment) in geometry_strategy()) {
        let geometry = Geometry::new(page_words * pages, page_words, increment).unwrap();
        let walk = Walk::new(Stride::RandomPage, geometry).unwrap();
        for (i, pos) in walk.positions().into_iter().enumerate() {
            prop_assert_eq!(pos / page_words, i / page_words);
        }
    }
}
