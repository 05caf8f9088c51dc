//! Summary-text parser
//!
//! Extracts a [`BenchmarkStats`] record from memtier_benchmark's
//! human-readable summary output. The text is scanned line by line and each
//! line is matched independently against every pattern; when several lines
//! match the same pattern, the last one wins. A report is only recognized
//! when at least a request count or a throughput figure was present —
//! anything else yields `None`, as does a captured number that fails to
//! parse.

use crate::stats::BenchmarkStats;
use regex::Regex;
use std::sync::LazyLock;

// "requests" must not be followed by '/' so a throughput line cannot feed
// the request counter (the regex crate has no lookahead).
static TOTAL_REQUESTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+requests(?:[^/]|$)").expect("requests pattern"));
static RPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d.]+)\s+requests/sec").expect("throughput pattern"));
static AVG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"avg:\s*([\d.]+)").expect("avg pattern"));
static P50_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p50:\s*([\d.]+)").expect("p50 pattern"));
static P90_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p90:\s*([\d.]+)").expect("p90 pattern"));
static P95_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p95:\s*([\d.]+)").expect("p95 pattern"));
static P99_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p99:\s*([\d.]+)").expect("p99 pattern"));
static P999_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p99\.9:\s*([\d.]+)").expect("p99.9 pattern"));
static ERRORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+errors").expect("errors pattern"));
static TOTAL_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"in\s+([\d.]+)\s+seconds").expect("elapsed pattern"));

/// Fields collected so far; `None` means "no line matched yet".
#[derive(Default)]
struct Collected {
    total_requests: Option<u64>,
    total_time: Option<f64>,
    requests_per_second: Option<f64>,
    avg_latency: Option<f64>,
    p50_latency: Option<f64>,
    p90_latency: Option<f64>,
    p95_latency: Option<f64>,
    p99_latency: Option<f64>,
    p999_latency: Option<f64>,
    errors: Option<u64>,
}

fn capture_u64(re: &Regex, line: &str) -> Option<Option<u64>> {
    match re.captures(line) {
        Some(caps) => caps[1].parse().ok().map(Some),
        None => Some(None),
    }
}

fn capture_f64(re: &Regex, line: &str) -> Option<Option<f64>> {
    match re.captures(line) {
        Some(caps) => caps[1].parse().ok().map(Some),
        None => Some(None),
    }
}

/// Parse benchmark summary text into a stats record.
///
/// Returns `None` when the text does not look like a report (neither a
/// request count nor a throughput line matched) or when a matched number
/// turns out to be unparseable. Fields without a matching line default to
/// zero in the returned record.
pub fn parse_output(output: &str) -> Option<BenchmarkStats> {
    let mut found = Collected::default();

    for line in output.lines() {
        if let Some(v) = capture_u64(&TOTAL_REQUESTS_RE, line)? {
            found.total_requests = Some(v);
        }
        if let Some(v) = capture_f64(&RPS_RE, line)? {
            found.requests_per_second = Some(v);
        }
        if let Some(v) = capture_f64(&AVG_RE, line)? {
            found.avg_latency = Some(v);
        }
        if let Some(v) = capture_f64(&P50_RE, line)? {
            found.p50_latency = Some(v);
        }
        if let Some(v) = capture_f64(&P90_RE, line)? {
            found.p90_latency = Some(v);
        }
        if let Some(v) = capture_f64(&P95_RE, line)? {
            found.p95_latency = Some(v);
        }
        if let Some(v) = capture_f64(&P99_RE, line)? {
            found.p99_latency = Some(v);
        }
        if let Some(v) = capture_f64(&P999_RE, line)? {
            found.p999_latency = Some(v);
        }
        if let Some(v) = capture_u64(&ERRORS_RE, line)? {
            found.errors = Some(v);
        }
        if let Some(v) = capture_f64(&TOTAL_TIME_RE, line)? {
            found.total_time = Some(v);
        }
    }

    // A text with neither figure is not a report, just unrelated prose.
    if found.total_requests.is_none() && found.requests_per_second.is_none() {
        return None;
    }

    Some(BenchmarkStats {
        total_requests: found.total_requests.unwrap_or(0),
        total_time: found.total_time.unwrap_or(0.0),
        requests_per_second: found.requests_per_second.unwrap_or(0.0),
        avg_latency: found.avg_latency.unwrap_or(0.0),
        p50_latency: found.p50_latency.unwrap_or(0.0),
        p90_latency: found.p90_latency.unwrap_or(0.0),
        p95_latency: found.p95_latency.unwrap_or(0.0),
        p99_latency: found.p99_latency.unwrap_or(0.0),
        p999_latency: found.p999_latency.unwrap_or(0.0),
        errors: found.errors.unwrap_or(0),
    })
}
