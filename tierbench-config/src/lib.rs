#![warn(missing_docs)]
//! Benchmark configuration for memtier_benchmark-compatible load generators.
//!
//! This crate provides the configuration side of tierbench:
//! - [`BenchmarkConfig`] — the full configuration record with memtier's
//!   documented defaults
//! - merge-with-defaults via serde: a partial TOML/JSON document
//!   deserializes into a complete record
//! - [`BenchmarkConfig::to_args`] — deterministic translation to the
//!   tool's command-line argument vector
//! - [`BenchmarkConfig::validate`] — domain-constraint checking, reported
//!   as human-readable messages

mod args;
mod model;
mod validate;

pub use model::{
    ArbitraryCommand, BenchmarkConfig, CommandKeyPattern, Protocol, RequestCount, SizePattern,
};
