//! Configuration validation
//!
//! Checks a [`BenchmarkConfig`] against memtier_benchmark's domain
//! constraints. Every rule is evaluated independently and every violation is
//! reported, so a caller can surface the complete list at once. Validation
//! never fails hard; an invalid configuration simply yields messages.

use crate::model::{BenchmarkConfig, RequestCount};
use regex::Regex;
use std::sync::LazyLock;

static RATIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d+$").expect("ratio pattern is valid"));

impl BenchmarkConfig {
    /// Validate this configuration, returning one message per violated rule.
    ///
    /// An empty vector means the configuration is valid. The default
    /// configuration always validates cleanly.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.server.is_empty() {
            errors.push("Server address is required".to_string());
        }

        if self.port == 0 {
            errors.push("Port must be between 1 and 65535".to_string());
        }

        if self.clients < 1 {
            errors.push("Number of clients must be at least 1".to_string());
        }

        if self.threads < 1 {
            errors.push("Number of threads must be at least 1".to_string());
        }

        if self.pipeline < 1 {
            errors.push("Pipeline must be at least 1".to_string());
        }

        if let RequestCount::Count(n) = self.requests {
            if n < 1 {
                errors.push("Number of requests must be at least 1".to_string());
            }
        }

        if !RATIO_RE.is_match(&self.ratio) {
            errors.push(r#"Ratio must be in format "number:number" (e.g., "1:10")"#.to_string());
        }

        if self.key_minimum >= self.key_maximum {
            errors.push("Key minimum must be less than key maximum".to_string());
        }

        if let Some(size) = self.data_size {
            if size < 1 {
                errors.push("Data size must be at least 1 byte".to_string());
            }
        }

        errors
    }
}
