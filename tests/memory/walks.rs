//! Traversal order and region lifecycle.

use crate::common::*;
use sympathy::{oracle, Geometry, MemorySettings, Stride, Traversal, Walk, WordRegion};

#[test]
fn single_page_random_walk_visits_each_word_once() {
    // Page of 4 words, K = 3.
    let walk = Walk::new(Stride::RandomPage, Geometry::new(4, 4, 3).unwrap()).unwrap();
    let mut seen = walk.positions();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[test]
fn all_walks_agree_on_the_checksum() {
    let geometry = Geometry::new(4096, 512, 514_229).unwrap();
    let region = WordRegion::allocate(geometry.array_words(), 777).unwrap();

    let sums: Vec<Checksum> = Stride::ALL
        .into_iter()
        .map(|stride| Walk::new(stride, geometry).unwrap().traverse(&region).unwrap())
        .collect();

    assert_eq!(sums[0], Checksum::new(777 * 4096));
    assert!(sums.iter().all(|s| *s == sums[0]));
}

#[test]
fn random_page_walk_stays_inside_each_page() {
    let geometry = Geometry::new(64, 16, 5).unwrap();
    let walk = Walk::new(Stride::RandomPage, geometry).unwrap();
    for (i, pos) in walk.positions().into_iter().enumerate() {
        assert_eq!(pos / 16, i / 16, "position {} left its page", pos);
    }
}

#[test]
fn corrupted_word_fails_the_oracle() {
    let geometry = Geometry::new(1024, 128, 7).unwrap();
    let mut region = WordRegion::allocate(1024, 777).unwrap();
    region.set_word(513, 778);

    for stride in Stride::ALL {
        let walk = Walk::new(stride, geometry).unwrap();
        let sum = walk.traverse(&region).unwrap();
        let err = oracle::verify(walk.name(), region.expected_checksum(), sum).unwrap_err();
        assert!(matches!(err, Error::Integrity { .. }));
    }
}

#[test]
fn increment_sharing_a_factor_is_rejected() {
    let geometry = Geometry::new(1024, 128, 64).unwrap();
    assert!(Walk::new(Stride::Linear, geometry).is_ok());
    for stride in [Stride::RandomPage, Stride::RandomHeap] {
        let err = Walk::new(stride, geometry).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}

#[test]
fn geometry_from_byte_sizes() {
    let config = ExperimentConfig::new(1 << 20, 1 << 14, 1, ids(&["linear"])).unwrap();
    let geometry = Geometry::from_config(&config, &MemorySettings::default()).unwrap();
    assert_eq!(geometry.array_words(), (1 << 20) / 8);
    assert_eq!(geometry.page_words(), (1 << 14) / 8);
    assert_eq!(geometry.pages(), 64);
}

#[test]
fn region_too_large_for_the_address_space_is_fatal() {
    let err = WordRegion::allocate(usize::MAX / 8, 777).unwrap_err();
    assert!(matches!(err, Error::ResourceAllocation { .. }));
    assert!(err.is_fatal());
}

#[test]
fn empty_region_is_rejected() {
    assert!(matches!(
        WordRegion::allocate(0, 777),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn registry_resolves_in_declared_order() {
    let geometry = Geometry::new(64, 16, 3).unwrap();
    let walks =
        sympathy::registry::resolve_memory(&ids(&["random-heap", "LinearWalk", "random_page"]), geometry)
            .unwrap();
    let names: Vec<&str> = walks.iter().map(|w| w.name()).collect();
    assert_eq!(names, vec!["RandomHeapWalk", "LinearWalk", "RandomPageWalk"]);
}
