//! Integration tests for tierbench
//!
//! These exercise the public surface end-to-end: configuration merging,
//! argument encoding, validation, report parsing, and the preset store.

use tierbench::{
    ArbitraryCommand, BenchmarkConfig, CommandKeyPattern, ConfigPreset, MemoryStore, PresetStore,
    RequestCount, RunHistory, RunRecord, RunStatus, parse_output,
};

/// The default configuration encodes to an empty argument vector.
#[test]
fn test_default_config_encodes_to_nothing() {
    let config = BenchmarkConfig::from_toml_str("").unwrap();
    assert!(config.to_args().is_empty());
}

/// Merging is idempotent: re-merging an already-complete record changes
/// nothing.
#[test]
fn test_merge_with_defaults_is_idempotent() {
    let partial = r#"{"server": "cache-2", "threads": 16, "tls": true}"#;
    let merged = BenchmarkConfig::from_json_str(partial).unwrap();

    let complete = serde_json::to_string(&merged).unwrap();
    let remerged = BenchmarkConfig::from_json_str(&complete).unwrap();

    assert_eq!(merged, remerged);
}

/// The same logical configuration encodes identically no matter how the
/// source document orders its fields.
#[test]
fn test_encoding_is_deterministic_across_field_order() {
    let a = BenchmarkConfig::from_toml_str("port = 7000\nclients = 10\ntls = true").unwrap();
    let b = BenchmarkConfig::from_toml_str("tls = true\nclients = 10\nport = 7000").unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_args(), b.to_args());
    assert_eq!(a.to_args(), vec!["--port", "7000", "--tls", "--clients", "10"]);
}

/// Every violated rule produces its own message.
#[test]
fn test_validation_reports_all_violations() {
    let config = BenchmarkConfig {
        port: 0,
        clients: 0,
        key_minimum: 1000,
        key_maximum: 10,
        ..Default::default()
    };
    let errors = config.validate();
    assert!(errors.len() >= 3);

    let text = errors.join("\n");
    assert!(text.contains("Port"));
    assert!(text.contains("clients"));
    assert!(text.contains("Key minimum"));
}

/// A defaulted configuration is sound.
#[test]
fn test_default_config_validates_cleanly() {
    assert!(BenchmarkConfig::default().validate().is_empty());
}

/// Ratio strings are checked against the weighted-mix format.
#[test]
fn test_ratio_rule() {
    let bad = BenchmarkConfig {
        ratio: "abc".to_string(),
        ..Default::default()
    };
    let errors = bad.validate();
    assert!(errors.iter().any(|e| e.contains("Ratio must be in format")));

    let good = BenchmarkConfig {
        ratio: "3:7".to_string(),
        ..Default::default()
    };
    assert!(good.validate().is_empty());
}

/// Field extraction from a summary report, unmatched fields zeroed.
#[test]
fn test_parser_extracts_known_lines() {
    let report = "10000 requests\n5000.5 requests/sec\navg: 2.34\np99: 9.87\n";
    let stats = parse_output(report).unwrap();

    assert_eq!(stats.total_requests, 10_000);
    assert_eq!(stats.requests_per_second, 5000.5);
    assert_eq!(stats.avg_latency, 2.34);
    assert_eq!(stats.p99_latency, 9.87);

    assert_eq!(stats.total_time, 0.0);
    assert_eq!(stats.p50_latency, 0.0);
    assert_eq!(stats.p90_latency, 0.0);
    assert_eq!(stats.p95_latency, 0.0);
    assert_eq!(stats.p999_latency, 0.0);
    assert_eq!(stats.errors, 0);
}

/// Text without request-count or throughput lines is not a report.
#[test]
fn test_parser_rejects_unrecognizable_text() {
    assert!(parse_output("").is_none());
    assert!(parse_output("the server was unreachable\ntry again later\n").is_none());
}

/// A full configuration flows through encoding with stable group ordering.
#[test]
fn test_full_invocation_encoding() {
    let config = BenchmarkConfig::from_toml_str(
        r#"
        server = "redis.internal"
        port = 6380
        tls = true
        requests = "allkeys"
        clients = 100
        key_prefix = "load:"

        [[commands]]
        command = "INCR __key__"
        ratio = 2
        key_pattern = "S"
        "#,
    )
    .unwrap();

    assert_eq!(config.requests, RequestCount::AllKeys);
    assert_eq!(
        config.to_args(),
        vec![
            "--server",
            "redis.internal",
            "--port",
            "6380",
            "--tls",
            "--requests",
            "allkeys",
            "--clients",
            "100",
            "--key-prefix",
            "load:",
            "--command",
            "INCR __key__",
            "--command-ratio",
            "2",
            "--command-key-pattern",
            "S",
        ]
    );
    assert_eq!(config.commands[0].key_pattern, CommandKeyPattern::Sequential);
}

/// Presets round-trip through the store with their configuration intact.
#[test]
fn test_preset_round_trip() {
    let mut store = MemoryStore::new();
    let mut presets = PresetStore::new(&mut store);

    let config = BenchmarkConfig {
        clients: 100,
        commands: vec![ArbitraryCommand::new("GET __key__")],
        ..Default::default()
    };
    let preset = ConfigPreset::new("heavy-read", "read-mostly soak", config.clone());
    let id = preset.id.clone();
    presets.save(preset).unwrap();

    let loaded = presets.find(&id).unwrap().unwrap();
    assert_eq!(loaded.config, config);
    assert_eq!(loaded.name, "heavy-read");
}

/// A parsed run lands in the history with its stats attached.
#[test]
fn test_run_history_records_parsed_runs() {
    let mut store = MemoryStore::new();
    let mut history = RunHistory::new(&mut store);

    let record = RunRecord::from_output(
        BenchmarkConfig::default(),
        "100000 requests completed in 2.52 seconds\n39682.54 requests/sec\n",
    );
    history.push(record).unwrap();

    let records = history.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, RunStatus::Completed);
    let stats = records[0].stats.as_ref().unwrap();
    assert_eq!(stats.total_requests, 100_000);
    assert_eq!(stats.total_time, 2.52);
}
