#![warn(missing_docs)]
//! Report parsing and formatting for memtier_benchmark-style output.
//!
//! The parser extracts a [`BenchmarkStats`] record from a tool's
//! human-readable summary text; the formatting module renders stats for
//! terminals and serializes them as JSON.

mod format;
mod parser;
mod stats;

pub use format::{
    format_bytes, format_duration, format_number, format_percentage, format_stats_human,
};
pub use parser::parse_output;
pub use stats::BenchmarkStats;

use std::str::FromStr;

/// Output format selection for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Terminal-friendly text
    #[default]
    Human,
    /// Machine-readable JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Serialize stats as prettified JSON.
pub fn generate_json_stats(stats: &BenchmarkStats) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_known_names() {
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_stats_round_trip() {
        let stats = BenchmarkStats {
            total_requests: 42,
            requests_per_second: 1234.5,
            ..Default::default()
        };
        let json = generate_json_stats(&stats).unwrap();
        let back: BenchmarkStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
