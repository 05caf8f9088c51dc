//! Output formatting
//!
//! Human-readable rendering for stats records plus small display helpers
//! shared by the CLI.

use crate::stats::BenchmarkStats;

/// Format a millisecond duration as a compact human string.
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        return format!("{ms}ms");
    }

    let seconds = ms / 1000;
    if seconds < 60 {
        return format!("{seconds}s");
    }

    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    if minutes < 60 {
        return if remaining_seconds > 0 {
            format!("{minutes}m {remaining_seconds}s")
        } else {
            format!("{minutes}m")
        };
    }

    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;
    if remaining_minutes > 0 {
        format!("{hours}h {remaining_minutes}m")
    } else {
        format!("{hours}h")
    }
}

/// Format a byte count with a binary-scaled unit, trimming trailing zeros.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[exponent])
}

/// Format an integer with thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format `value` as a percentage of `total` with one decimal place.
pub fn format_percentage(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0%".to_string();
    }
    format!("{:.1}%", (value / total) * 100.0)
}

/// Format a stats record for terminal display.
pub fn format_stats_human(stats: &BenchmarkStats) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Benchmark Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!(
        "  requests: {}  errors: {}\n",
        format_number(stats.total_requests),
        format_number(stats.errors)
    ));
    output.push_str(&format!(
        "  throughput: {:.2} ops/sec  elapsed: {:.2} s\n",
        stats.requests_per_second, stats.total_time
    ));
    output.push_str(&format!("  latency avg: {:.3} ms\n", stats.avg_latency));
    output.push_str(&format!(
        "  p50: {:.3} ms  p90: {:.3} ms  p95: {:.3} ms\n",
        stats.p50_latency, stats.p90_latency, stats.p95_latency
    ));
    output.push_str(&format!(
        "  p99: {:.3} ms  p99.9: {:.3} ms\n",
        stats.p99_latency, stats.p999_latency
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_scales_through_units() {
        assert_eq!(format_duration(450), "450ms");
        assert_eq!(format_duration(12_000), "12s");
        assert_eq!(format_duration(125_000), "2m 5s");
        assert_eq!(format_duration(120_000), "2m");
        assert_eq!(format_duration(5_400_000), "1h 30m");
        assert_eq!(format_duration(7_200_000), "2h");
    }

    #[test]
    fn bytes_scale_with_trimmed_decimals() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn numbers_get_thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn percentage_handles_zero_total() {
        assert_eq!(format_percentage(1.0, 0.0), "0%");
        assert_eq!(format_percentage(42.0, 100.0), "42.0%");
        assert_eq!(format_percentage(1.0, 3.0), "33.3%");
    }

    #[test]
    fn human_stats_mention_every_metric() {
        let stats = BenchmarkStats {
            total_requests: 100_000,
            total_time: 2.52,
            requests_per_second: 39_682.54,
            avg_latency: 1.26,
            p50_latency: 1.1,
            p90_latency: 2.3,
            p95_latency: 3.1,
            p99_latency: 5.87,
            p999_latency: 9.9,
            errors: 3,
        };
        let rendered = format_stats_human(&stats);
        assert!(rendered.contains("100,000"));
        assert!(rendered.contains("39682.54 ops/sec"));
        assert!(rendered.contains("p99.9: 9.900 ms"));
        assert!(rendered.contains("errors: 3"));
    }
}
