#![warn(missing_docs)]
//! # tierbench
//!
//! Configuration and report toolkit for memtier_benchmark-compatible load
//! generators:
//!
//! - **Configuration codec**: a typed [`BenchmarkConfig`] with memtier's
//!   defaults, merge-with-defaults from partial TOML/JSON documents,
//!   validation with full violation reporting, and deterministic encoding
//!   to the tool's command-line arguments.
//! - **Report parser**: extracts [`BenchmarkStats`] from the tool's
//!   human-readable summary output, tolerating missing fields.
//! - **Persistence**: named configuration presets and a bounded run history
//!   behind a narrow key-value storage interface.
//!
//! Both core components are pure, synchronous functions over plain values:
//! no I/O, no shared state, safe to call from any context.
//!
//! ## Quick start
//!
//! ```
//! use tierbench::{BenchmarkConfig, parse_output};
//!
//! let config = BenchmarkConfig::from_toml_str("clients = 8\ntls = true").unwrap();
//! assert!(config.validate().is_empty());
//! assert_eq!(config.to_args(), vec!["--tls", "--clients", "8"]);
//!
//! let stats = parse_output("10000 requests\n5000.5 requests/sec\n").unwrap();
//! assert_eq!(stats.total_requests, 10_000);
//! ```

// Re-export the configuration codec
pub use tierbench_config::{
    ArbitraryCommand, BenchmarkConfig, CommandKeyPattern, Protocol, RequestCount, SizePattern,
};

// Re-export report parsing and formatting
pub use tierbench_report::{
    BenchmarkStats, OutputFormat, format_bytes, format_duration, format_number, format_percentage,
    format_stats_human, generate_json_stats, parse_output,
};

// Re-export persistence and the CLI entry point
pub use tierbench_cli::{
    ConfigPreset, FileStore, KvStore, MemoryStore, PresetStore, RunHistory, RunRecord, RunStatus,
    StoreError, run,
};
