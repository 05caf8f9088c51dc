//! Configuration model
//!
//! The full benchmark configuration record and its enumerated field types.
//! Defaults match memtier_benchmark's own, so an empty document merges into
//! a runnable configuration and a default record encodes to no arguments.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Wire protocol spoken to the server under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// RESP with automatic version negotiation (memtier's default)
    #[default]
    Redis,
    /// Force RESP2
    Resp2,
    /// Force RESP3
    Resp3,
    /// Memcache text protocol
    MemcacheText,
    /// Memcache binary protocol
    MemcacheBinary,
}

impl Protocol {
    /// The value memtier_benchmark expects after `--protocol`
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Redis => "redis",
            Protocol::Resp2 => "resp2",
            Protocol::Resp3 => "resp3",
            Protocol::MemcacheText => "memcache_text",
            Protocol::MemcacheBinary => "memcache_binary",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object size distribution when a size range or list is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SizePattern {
    /// Uniform random sizes
    #[serde(rename = "R")]
    #[default]
    Random,
    /// Sizes assigned sequentially across the key space
    #[serde(rename = "S")]
    Sequential,
}

impl SizePattern {
    /// Single-letter code used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            SizePattern::Random => "R",
            SizePattern::Sequential => "S",
        }
    }
}

impl fmt::Display for SizePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-access distribution for an arbitrary command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CommandKeyPattern {
    /// Gaussian distribution over the key range
    #[serde(rename = "G")]
    Gaussian,
    /// Uniform random
    #[serde(rename = "R")]
    #[default]
    Random,
    /// Sequential traversal
    #[serde(rename = "S")]
    Sequential,
    /// Parallel sequential traversal (one stream per connection)
    #[serde(rename = "P")]
    Parallel,
}

impl CommandKeyPattern {
    /// Single-letter code used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKeyPattern::Gaussian => "G",
            CommandKeyPattern::Random => "R",
            CommandKeyPattern::Sequential => "S",
            CommandKeyPattern::Parallel => "P",
        }
    }
}

impl fmt::Display for CommandKeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total number of requests per client: a finite count, or the `allkeys`
/// sentinel meaning "run until the whole key range has been consumed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCount {
    /// Fixed number of requests
    Count(u64),
    /// Run until every key in the range has been used once
    AllKeys,
}

impl Default for RequestCount {
    fn default() -> Self {
        RequestCount::Count(10_000)
    }
}

impl fmt::Display for RequestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestCount::Count(n) => write!(f, "{n}"),
            RequestCount::AllKeys => f.write_str("allkeys"),
        }
    }
}

impl Serialize for RequestCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequestCount::Count(n) => serializer.serialize_u64(*n),
            RequestCount::AllKeys => serializer.serialize_str("allkeys"),
        }
    }
}

impl<'de> Deserialize<'de> for RequestCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(RequestCount::Count(n)),
            Raw::Text(s) if s == "allkeys" => Ok(RequestCount::AllKeys),
            Raw::Text(s) => Err(D::Error::custom(format!(
                "invalid request count {s:?} (expected a number or \"allkeys\")"
            ))),
        }
    }
}

/// A custom command executed alongside (or instead of) the built-in
/// SET/GET mix. Held in order inside [`BenchmarkConfig::commands`]; the
/// order is reflected in the generated argument vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryCommand {
    /// Command text, with `__key__` / `__data__` placeholders
    pub command: String,
    /// Weight of this command within the overall mix
    #[serde(default = "default_command_ratio")]
    pub ratio: u32,
    /// Key-access distribution for this command
    #[serde(default)]
    pub key_pattern: CommandKeyPattern,
}

fn default_command_ratio() -> u32 {
    1
}

impl ArbitraryCommand {
    /// Command with the default ratio (1) and key pattern (random)
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ratio: default_command_ratio(),
            key_pattern: CommandKeyPattern::default(),
        }
    }
}

/// Complete benchmark configuration.
///
/// Every field has a documented default matching memtier_benchmark, so
/// `#[serde(default)]` makes deserialization of a partial document the
/// merge-with-defaults operation: supplied fields shallowly replace the
/// default value (the `commands` list is replaced wholesale, not merged).
///
/// Records are treated as immutable values; transformations produce new
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    // Connection and general options
    /// Server address
    pub server: String,
    /// Server port
    pub port: u16,
    /// Connect through a UNIX domain socket instead of TCP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unix_socket: Option<String>,
    /// Force IPv4 resolution
    pub ipv4: bool,
    /// Force IPv6 resolution
    pub ipv6: bool,
    /// Protocol spoken to the server
    pub protocol: Protocol,
    /// Credentials: `password` or `user:password`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticate: Option<String>,

    // TLS options
    /// Enable TLS
    pub tls: bool,
    /// Client certificate file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_cert: Option<String>,
    /// Client private key file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_key: Option<String>,
    /// CA certificate bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_cacert: Option<String>,
    /// Skip peer certificate verification
    pub tls_skip_verify: bool,
    /// Allowed TLS protocol versions, e.g. "TLSv1.2"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_protocols: Option<String>,
    /// Server Name Indication value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,

    // Test options
    /// Number of full test iterations
    pub run_count: u32,
    /// Requests per client, or `allkeys`
    pub requests: RequestCount,
    /// Request rate limit per client, in ops/sec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limiting: Option<u32>,
    /// Connections per thread
    pub clients: u32,
    /// Worker threads
    pub threads: u32,
    /// Run for a fixed number of seconds instead of a request count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_time: Option<u32>,
    /// SET:GET ratio, e.g. "1:10"
    pub ratio: String,
    /// Requests pipelined per connection
    pub pipeline: u32,
    /// Seconds between forced reconnects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect_interval: Option<u32>,
    /// Keys fetched per GET via multi-key commands (0 = disabled)
    pub multi_key_get: u32,
    /// Redis database to SELECT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_db: Option<u32>,
    /// Seed each client's RNG distinctly
    pub distinct_client_seed: bool,
    /// Re-seed RNGs from the clock
    pub randomize: bool,

    // Object options
    /// Fixed object size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_size: Option<u32>,
    /// Offset added to generated object data
    pub data_offset: u32,
    /// Use random object payloads
    pub random_data: bool,
    /// Object size range, e.g. "32-1024"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_size_range: Option<String>,
    /// Weighted object size list, e.g. "32:1,64:2,128:1"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_size_list: Option<String>,
    /// Distribution of sizes within a range
    pub data_size_pattern: SizePattern,
    /// Expiry range in seconds, e.g. "10-3600"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_range: Option<String>,

    // Imported data options
    /// Import objects from a file instead of generating them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_import: Option<String>,
    /// Verify objects after writing
    pub data_verify: bool,
    /// Only verify, do not load
    pub verify_only: bool,
    /// Generate keys for imported objects
    pub generate_keys: bool,
    /// Ignore expiry information in imported data
    pub no_expiry: bool,

    // Key options
    /// Prefix prepended to every key
    pub key_prefix: String,
    /// Lowest key id in the range
    pub key_minimum: u64,
    /// Highest key id in the range
    pub key_maximum: u64,
    /// SET:GET key-access pattern, e.g. "R:R", "G:G", "P:P"
    pub key_pattern: String,
    /// Standard deviation for gaussian key access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_stddev: Option<f64>,
    /// Median for gaussian key access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_median: Option<f64>,
    /// Exponent for zipfian key access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_zipf_exp: Option<f64>,

    // WAIT options
    /// SET:WAIT ratio, e.g. "1:0"
    pub wait_ratio: String,
    /// Replica count range WAIT should block on, e.g. "1-3"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_slaves: Option<String>,
    /// WAIT timeout range in milliseconds, e.g. "100-1000"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_timeout: Option<String>,

    // Arbitrary commands
    /// Custom commands, executed in the listed order
    pub commands: Vec<ArbitraryCommand>,

    // Output and debug options
    /// Verbose debug output
    pub debug: bool,
    /// Print the effective configuration before running
    pub show_config: bool,
    /// Suppress the latency histogram
    pub hide_histogram: bool,
    /// Percentiles to report, e.g. "50,90,95,99,99.9"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_percentiles: Option<String>,
    /// Print per-run results in addition to aggregates
    pub print_all_runs: bool,
    /// Per-client stats file prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_stats: Option<String>,
    /// Write results to a file instead of stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,
    /// Write results as JSON to a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_out_file: Option<String>,
    /// HDR histogram output file prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdr_file_prefix: Option<String>,
    /// Run against a Redis cluster
    pub cluster_mode: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            server: "localhost".to_string(),
            port: 6379,
            unix_socket: None,
            ipv4: false,
            ipv6: false,
            protocol: Protocol::default(),
            authenticate: None,

            tls: false,
            tls_cert: None,
            tls_key: None,
            tls_cacert: None,
            tls_skip_verify: false,
            tls_protocols: None,
            sni: None,

            run_count: 1,
            requests: RequestCount::default(),
            rate_limiting: None,
            clients: 50,
            threads: 4,
            test_time: None,
            ratio: "1:10".to_string(),
            pipeline: 1,
            reconnect_interval: None,
            multi_key_get: 0,
            select_db: None,
            distinct_client_seed: false,
            randomize: false,

            data_size: Some(32),
            data_offset: 0,
            random_data: false,
            data_size_range: None,
            data_size_list: None,
            data_size_pattern: SizePattern::default(),
            expiry_range: None,

            data_import: None,
            data_verify: false,
            verify_only: false,
            generate_keys: false,
            no_expiry: false,

            key_prefix: "memtier-".to_string(),
            key_minimum: 0,
            key_maximum: 10_000_000,
            key_pattern: "R:R".to_string(),
            key_stddev: None,
            key_median: None,
            key_zipf_exp: None,

            wait_ratio: "1:0".to_string(),
            num_slaves: None,
            wait_timeout: None,

            commands: Vec::new(),

            debug: false,
            show_config: false,
            hide_histogram: false,
            print_percentiles: None,
            print_all_runs: false,
            client_stats: None,
            out_file: None,
            json_out_file: None,
            hdr_file_prefix: None,
            cluster_mode: false,
        }
    }
}

impl BenchmarkConfig {
    /// Load a configuration from a TOML file.
    ///
    /// The file may be partial; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        Ok(config)
    }

    /// Merge a partial TOML document onto the default configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Merge a partial JSON document onto the default configuration.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
