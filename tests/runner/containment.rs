//! A failing strategy is contained; the others still run.

use crate::common::*;

fn runner(trials: u32) -> ExperimentRunner {
    let config = ExperimentConfig::new(32 * 1024, 4096, trials, ids(&["direct"])).unwrap();
    ExperimentRunner::new(config).with_settle(false)
}

#[test]
fn corruption_between_phases_is_an_integrity_failure() {
    let scratch = Scratch::new();
    let runner = runner(3);
    let file = BackingFile::allocate(&scratch.path, runner.config()).unwrap();
    let strategies: Vec<Box<dyn IoStrategy>> = vec![Box::new(CorruptBetweenPhases {
        inner: Box::new(sympathy::DirectFileAccess::new()),
        offset: 100,
    })];

    let mut sink = Collector::new();
    let summary = runner.run_io_strategies(&file, &strategies, &mut sink);

    let outcome = &summary.outcomes[0];
    assert_eq!(outcome.verified_trials, 0);
    match &outcome.failure {
        Some(Error::Integrity {
            strategy,
            expected,
            actual,
        }) => {
            assert_eq!(strategy, "DirectFileAccess");
            assert_eq!(*expected, file.workload().expected_checksum());
            assert_ne!(expected, actual);
        }
        other => panic!("expected integrity failure, got {:?}", other),
    }
    // Nothing reported for the failed trial, and the remaining two were skipped.
    assert!(sink.records.is_empty());
    assert_eq!(sink.failures.len(), 1);
    assert_eq!(sink.failures[0].1, 0);
}

#[test]
fn one_failing_strategy_does_not_stop_the_others() {
    let scratch = Scratch::new();
    let runner = runner(2);
    let file = BackingFile::allocate(&scratch.path, runner.config()).unwrap();
    let settings = scratch.settings();

    let mut strategies: Vec<Box<dyn IoStrategy>> = vec![IoStrategyKind::Direct.build(&settings)];
    strategies.push(Box::new(CorruptBetweenPhases {
        inner: IoStrategyKind::Mapped.build(&settings),
        offset: 4096,
    }));
    strategies.push(IoStrategyKind::Channel.build(&settings));

    let mut sink = Collector::new();
    let summary = runner.run_io_strategies(&file, &strategies, &mut sink);

    assert!(!summary.all_verified());
    let failed: Vec<&str> = summary.failed().map(|o| o.strategy.as_str()).collect();
    assert_eq!(failed, vec!["MappedFileAccess"]);
    assert_eq!(summary.outcome("DirectFileAccess").unwrap().verified_trials, 2);
    assert_eq!(summary.outcome("ChannelFileAccess").unwrap().verified_trials, 2);
    assert_eq!(sink.for_strategy("MappedFileAccess").count(), 0);
    assert_eq!(sink.for_strategy("ChannelFileAccess").count(), 4);
}

#[test]
fn write_that_skips_bytes_fails_even_when_read_agrees() {
    let scratch = Scratch::new();
    let runner = runner(1);
    let file = BackingFile::allocate(&scratch.path, runner.config()).unwrap();
    let strategies: Vec<Box<dyn IoStrategy>> = vec![Box::new(SilentSkipper)];

    let mut sink = Collector::new();
    let summary = runner.run_io_strategies(&file, &strategies, &mut sink);

    match &summary.outcomes[0].failure {
        Some(Error::Integrity { expected, actual, .. }) => {
            assert_eq!(*expected, file.workload().expected_checksum());
            assert_eq!(*actual, Checksum::ZERO);
        }
        other => panic!("expected integrity failure, got {:?}", other),
    }
}

#[test]
fn short_read_is_an_io_failure_in_the_read_phase() {
    let scratch = Scratch::new();
    let runner = runner(2);
    let file = BackingFile::allocate(&scratch.path, runner.config()).unwrap();
    let strategies: Vec<Box<dyn IoStrategy>> = vec![
        Box::new(Truncating),
        Box::new(sympathy::DirectFileAccess::new()),
    ];

    let mut sink = Collector::new();
    let summary = runner.run_io_strategies(&file, &strategies, &mut sink);

    match &summary.outcomes[0].failure {
        Some(Error::Io { strategy, phase, source }) => {
            assert_eq!(strategy, "Truncating");
            assert_eq!(*phase, Phase::Read);
            assert_eq!(source.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("expected I/O failure, got {:?}", other),
    }
    // Direct rewrites the full length and recovers.
    assert!(summary.outcomes[1].is_verified());
    assert_eq!(summary.outcomes[1].verified_trials, 2);
}
