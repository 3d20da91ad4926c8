//! Reporters over real experiments.

use crate::common::*;
use sympathy::{JsonLinesReporter, TextReporter};

#[test]
fn json_lines_one_object_per_record() {
    let scratch = Scratch::new();
    let config = ExperimentConfig::new(16 * 1024, 4096, 2, ids(&["direct", "stream"])).unwrap();

    let mut reporter = JsonLinesReporter::new(Vec::new());
    ExperimentRunner::new(config)
        .with_settle(false)
        .run_io(&scratch.settings(), &mut reporter)
        .unwrap();

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0]["strategy"], "DirectFileAccess");
    assert_eq!(lines[0]["phase"], "write");
    assert_eq!(lines[1]["phase"], "read");
    assert_eq!(lines[0]["checksum"], lines[1]["checksum"]);
    assert!(lines.iter().all(|l| l["bytes"] == 16 * 1024));
}

#[test]
fn text_report_has_a_line_per_record() {
    let config = ExperimentConfig::new(64 * 1024, 4096, 1, ids(&["linear", "random-page"])).unwrap();
    let settings = sympathy::MemorySettings::new().with_increment(3);

    let mut reporter = TextReporter::new(Vec::new());
    ExperimentRunner::new(config)
        .run_memory(&settings, &mut reporter)
        .unwrap();

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("LinearWalk\ttrial=0\ttraverse\t"));
    assert!(lines[1].starts_with("RandomPageWalk\ttrial=0\ttraverse\t"));
    assert!(lines.iter().all(|l| l.ends_with("MB/sec")));
}
