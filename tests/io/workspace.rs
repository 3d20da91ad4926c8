//! Backing file allocation and release.

use crate::common::*;

#[test]
fn zero_size_is_rejected_before_touching_disk() {
    let scratch = Scratch::new();
    assert!(ExperimentConfig::new(0, 4096, 1, ids(&["direct"])).is_err());

    let err = BackingFile::with_size(&scratch.path, 0, 4096).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(!scratch.path.exists());
}

#[test]
fn size_not_a_multiple_of_chunk_is_rejected() {
    let scratch = Scratch::new();
    assert!(BackingFile::with_size(&scratch.path, 4097, 4096).is_err());
    assert!(!scratch.path.exists());
}

#[test]
fn unwritable_location_is_fatal_allocation_failure() {
    let scratch = Scratch::new();
    let path = scratch.dir.path().join("missing").join("backing.dat");

    let err = BackingFile::with_size(&path, 4096, 4096).unwrap_err();
    assert!(matches!(err, Error::ResourceAllocation { .. }));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("backing.dat"));
}

#[test]
fn allocation_is_zero_filled_at_full_size() {
    let scratch = Scratch::new();
    let file = scratch.backing(5 * 4096, 4096);

    let bytes = std::fs::read(file.path()).unwrap();
    assert_eq!(bytes.len(), 5 * 4096);
    assert!(bytes.iter().all(|b| *b == 0));
    assert_eq!(file.len(), 5 * 4096);
    assert_eq!(file.chunk_size(), 4096);
}

#[test]
fn release_removes_the_file() {
    let scratch = Scratch::new();
    let file = scratch.backing(4096, 4096);
    file.release().unwrap();
    assert!(!scratch.path.exists());
}

#[test]
fn drop_removes_the_file() {
    let scratch = Scratch::new();
    {
        let _file = scratch.backing(4096, 4096);
        assert!(scratch.path.exists());
    }
    assert!(!scratch.path.exists());
}

#[test]
fn release_of_vanished_file_is_cleanup_failure() {
    let scratch = Scratch::new();
    let file = scratch.backing(4096, 4096);
    std::fs::remove_file(&scratch.path).unwrap();

    let err = file.release().unwrap_err();
    assert!(matches!(err, Error::Cleanup { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn settle_is_harmless() {
    let scratch = Scratch::new();
    let file = scratch.backing(4096, 4096);
    let strategy = sympathy::DirectFileAccess::new();
    let written = strategy.write(&file, &file.workload()).unwrap();
    file.settle().unwrap();
    assert_eq!(strategy.read(&file).unwrap(), written);
}
