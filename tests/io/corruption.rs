//! A byte changed between write and read is caught by the oracle.

use crate::common::*;
use std::io::ErrorKind;
use sympathy::oracle;

#[test]
fn flipped_byte_fails_verification_for_every_strategy() {
    let scratch = Scratch::new();
    let file = scratch.backing(64 * 1024, 4096);
    let workload = file.workload();

    for strategy in all_strategies(&scratch.settings()) {
        let written = strategy.write(&file, &workload).unwrap();
        flip_byte(&file, 12_345);
        let read = strategy.read(&file).unwrap();

        let err = oracle::verify(strategy.name(), written, read).unwrap_err();
        match err {
            Error::Integrity {
                strategy: name,
                expected,
                actual,
            } => {
                assert_eq!(name, strategy.name());
                assert_eq!(expected, written);
                assert_eq!(actual, read);
            }
            other => panic!("{}: expected integrity failure, got {}", strategy.name(), other),
        }
    }
}

#[test]
fn flipped_byte_in_last_chunk_is_caught() {
    let scratch = Scratch::new();
    let file = scratch.backing(16 * 1024, 4096);
    let strategy = sympathy::ChannelFileAccess::new();

    let written = strategy.write(&file, &file.workload()).unwrap();
    flip_byte(&file, 16 * 1024 - 1);
    let read = strategy.read(&file).unwrap();
    assert!(oracle::verify(strategy.name(), written, read).is_err());
}

#[test]
fn truncated_file_is_a_short_read_not_a_mismatch() {
    let scratch = Scratch::new();
    let file = scratch.backing(32 * 1024, 4096);
    let workload = file.workload();

    for strategy in all_strategies(&scratch.settings()) {
        strategy.write(&file, &workload).unwrap();
        file.open_write().unwrap().set_len(20 * 1024).unwrap();

        let err = strategy.read(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof, "{}", strategy.name());
    }
}

#[test]
fn grown_file_is_rejected() {
    let scratch = Scratch::new();
    let file = scratch.backing(16 * 1024, 4096);
    let workload = file.workload();

    for strategy in all_strategies(&scratch.settings()) {
        strategy.write(&file, &workload).unwrap();
        file.open_write().unwrap().set_len(20 * 1024).unwrap();

        let err = strategy.read(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData, "{}", strategy.name());
        file.open_write().unwrap().set_len(16 * 1024).unwrap();
    }
}
