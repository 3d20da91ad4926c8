//! Every strategy writes the generated sequence and reads it back intact.

use crate::common::*;
use std::fs;

#[test]
fn every_strategy_round_trips() {
    let scratch = Scratch::new();
    let file = scratch.backing(256 * 1024, 4096);
    let workload = file.workload();
    let expected = workload.expected_checksum();

    for strategy in all_strategies(&scratch.settings()) {
        let written = strategy.write(&file, &workload).unwrap();
        assert_eq!(written, expected, "{} write checksum", strategy.name());
        let read = strategy.read(&file).unwrap();
        assert_eq!(read, written, "{} read checksum", strategy.name());
    }
}

#[test]
fn every_strategy_leaves_the_sequence_on_disk() {
    let scratch = Scratch::new();
    let file = scratch.backing(3 * 4096, 4096);
    let workload = file.workload();

    for strategy in all_strategies(&scratch.settings()) {
        fs::write(file.path(), vec![0xAAu8; 3 * 4096]).unwrap();
        strategy.write(&file, &workload).unwrap();

        let bytes = fs::read(file.path()).unwrap();
        assert_eq!(bytes.len(), 3 * 4096, "{} changed the file size", strategy.name());
        for (i, b) in bytes.iter().enumerate() {
            assert_eq!(*b, i as u8, "{} wrong byte at {}", strategy.name(), i);
        }
    }
}

#[test]
fn single_chunk_direct_file() {
    // 4096-byte file, 4096-byte chunks: one chunk, checksum of 0..=255 sixteen times.
    let scratch = Scratch::new();
    let file = scratch.backing(4096, 4096);
    let strategy = sympathy::DirectFileAccess::new();

    let written = strategy.write(&file, &file.workload()).unwrap();
    let read = strategy.read(&file).unwrap();

    assert_eq!(written.value(), 16 * (255 * 256 / 2));
    assert_eq!(read, written);
}

#[test]
fn strategies_read_what_another_wrote() {
    let scratch = Scratch::new();
    let file = scratch.backing(128 * 1024, 4096);
    let workload = file.workload();
    let strategies = all_strategies(&scratch.settings());

    for writer in &strategies {
        let written = writer.write(&file, &workload).unwrap();
        for reader in &strategies {
            assert_eq!(
                reader.read(&file).unwrap(),
                written,
                "{} reading {}",
                reader.name(),
                writer.name()
            );
        }
    }
}

#[test]
fn mapped_window_larger_than_file() {
    let scratch = Scratch::new();
    let file = scratch.backing(8192, 4096);
    let strategy = sympathy::MappedFileAccess::new(1024 * 1024);

    let written = strategy.write(&file, &file.workload()).unwrap();
    assert_eq!(strategy.read(&file).unwrap(), written);
}

#[test]
fn mapped_file_spanning_several_windows() {
    let scratch = Scratch::new();
    // Two and a half 64KB windows.
    let file = scratch.backing(160 * 1024, 4096);
    let strategy = sympathy::MappedFileAccess::new(64 * 1024);

    let written = strategy.write(&file, &file.workload()).unwrap();
    assert_eq!(written, file.workload().expected_checksum());
    assert_eq!(strategy.read(&file).unwrap(), written);
}

#[test]
fn stream_blocks_that_do_not_divide_the_file() {
    let scratch = Scratch::new();
    let file = scratch.backing(40 * 1024, 4096);
    let strategy = sympathy::StreamFileAccess::new(3000, 7000);

    let written = strategy.write(&file, &file.workload()).unwrap();
    assert_eq!(written, file.workload().expected_checksum());
    assert_eq!(strategy.read(&file).unwrap(), written);
}

#[test]
fn registry_accepts_ids_and_names() {
    let settings = IoSettings::default();
    let built = sympathy::registry::resolve_io(
        &ids(&["Direct", "buffered_stream", "MappedFileAccess"]),
        &settings,
    )
    .unwrap();
    let names: Vec<&str> = built.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec!["DirectFileAccess", "BufferedStreamFileAccess", "MappedFileAccess"]
    );
}

#[test]
fn registry_rejects_unknown_strategy() {
    let err = sympathy::registry::resolve_io(&ids(&["direct", "carrier-pigeon"]), &IoSettings::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(err.to_string().contains("carrier-pigeon"));
}
