//! Stats record

use serde::{Deserialize, Serialize};

/// Summary statistics extracted from a benchmark report.
///
/// Every field defaults to zero; a field stays zero when the source text
/// carried no matching line. Latencies are in milliseconds, elapsed time in
/// seconds, as reported by memtier_benchmark.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkStats {
    /// Total requests issued
    pub total_requests: u64,
    /// Elapsed wall-clock time in seconds
    pub total_time: f64,
    /// Aggregate throughput
    pub requests_per_second: f64,
    /// Mean latency
    pub avg_latency: f64,
    /// 50th percentile latency
    pub p50_latency: f64,
    /// 90th percentile latency
    pub p90_latency: f64,
    /// 95th percentile latency
    pub p95_latency: f64,
    /// 99th percentile latency
    pub p99_latency: f64,
    /// 99.9th percentile latency
    pub p999_latency: f64,
    /// Failed requests
    pub errors: u64,
}
