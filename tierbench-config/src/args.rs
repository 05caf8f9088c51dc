//! Command-line encoding
//!
//! Translates a [`BenchmarkConfig`] into the argument vector memtier_benchmark
//! expects. A field that still holds its default emits nothing, so the default
//! configuration encodes to an empty vector and generated invocations stay
//! minimal. Emission order is fixed by option group (connection, TLS, test,
//! object, import, key, WAIT, commands, output) regardless of how the record
//! was built.

use crate::model::{BenchmarkConfig, CommandKeyPattern};
use std::fmt;

/// Argument vector under construction
#[derive(Default)]
struct ArgList(Vec<String>);

impl ArgList {
    fn flag(&mut self, flag: &str) {
        self.0.push(flag.to_string());
    }

    fn flag_if(&mut self, flag: &str, enabled: bool) {
        if enabled {
            self.flag(flag);
        }
    }

    fn pair(&mut self, flag: &str, value: impl fmt::Display) {
        self.0.push(flag.to_string());
        self.0.push(value.to_string());
    }

    fn opt<T: fmt::Display>(&mut self, flag: &str, value: Option<&T>) {
        if let Some(v) = value {
            self.pair(flag, v);
        }
    }
}

impl BenchmarkConfig {
    /// Encode this configuration as memtier_benchmark command-line arguments.
    ///
    /// Boolean fields emit the bare flag, valued fields emit the flag followed
    /// by the stringified value, and optional fields emit only when present.
    pub fn to_args(&self) -> Vec<String> {
        let defaults = BenchmarkConfig::default();
        let mut args = ArgList::default();

        // Connection and general options
        if self.server != defaults.server {
            args.pair("--server", &self.server);
        }
        if self.port != defaults.port {
            args.pair("--port", self.port);
        }
        args.opt("--unix-socket", self.unix_socket.as_ref());
        args.flag_if("--ipv4", self.ipv4);
        args.flag_if("--ipv6", self.ipv6);
        if self.protocol != defaults.protocol {
            args.pair("--protocol", self.protocol);
        }
        args.opt("--authenticate", self.authenticate.as_ref());

        // TLS options
        args.flag_if("--tls", self.tls);
        args.opt("--cert", self.tls_cert.as_ref());
        args.opt("--key", self.tls_key.as_ref());
        args.opt("--cacert", self.tls_cacert.as_ref());
        args.flag_if("--tls-skip-verify", self.tls_skip_verify);
        args.opt("--tls-protocols", self.tls_protocols.as_ref());
        args.opt("--sni", self.sni.as_ref());

        // Test options
        if self.run_count != defaults.run_count {
            args.pair("--run-count", self.run_count);
        }
        if self.requests != defaults.requests {
            args.pair("--requests", self.requests);
        }
        args.opt("--rate-limiting", self.rate_limiting.as_ref());
        if self.clients != defaults.clients {
            args.pair("--clients", self.clients);
        }
        if self.threads != defaults.threads {
            args.pair("--threads", self.threads);
        }
        args.opt("--test-time", self.test_time.as_ref());
        if self.ratio != defaults.ratio {
            args.pair("--ratio", &self.ratio);
        }
        if self.pipeline != defaults.pipeline {
            args.pair("--pipeline", self.pipeline);
        }
        args.opt("--reconnect-interval", self.reconnect_interval.as_ref());
        if self.multi_key_get > 0 {
            args.pair("--multi-key-get", self.multi_key_get);
        }
        // --select-db 0 is meaningful, so presence alone decides
        args.opt("--select-db", self.select_db.as_ref());
        args.flag_if("--distinct-client-seed", self.distinct_client_seed);
        args.flag_if("--randomize", self.randomize);

        // Object options
        if let Some(size) = self.data_size {
            if self.data_size != defaults.data_size {
                args.pair("--data-size", size);
            }
        }
        if self.data_offset > 0 {
            args.pair("--data-offset", self.data_offset);
        }
        args.flag_if("--random-data", self.random_data);
        args.opt("--data-size-range", self.data_size_range.as_ref());
        args.opt("--data-size-list", self.data_size_list.as_ref());
        if self.data_size_pattern != defaults.data_size_pattern {
            args.pair("--data-size-pattern", self.data_size_pattern);
        }
        args.opt("--expiry-range", self.expiry_range.as_ref());

        // Imported data options
        args.opt("--data-import", self.data_import.as_ref());
        args.flag_if("--data-verify", self.data_verify);
        args.flag_if("--verify-only", self.verify_only);
        args.flag_if("--generate-keys", self.generate_keys);
        args.flag_if("--no-expiry", self.no_expiry);

        // Key options
        if self.key_prefix != defaults.key_prefix {
            args.pair("--key-prefix", &self.key_prefix);
        }
        if self.key_minimum != defaults.key_minimum {
            args.pair("--key-minimum", self.key_minimum);
        }
        if self.key_maximum != defaults.key_maximum {
            args.pair("--key-maximum", self.key_maximum);
        }
        if self.key_pattern != defaults.key_pattern {
            args.pair("--key-pattern", &self.key_pattern);
        }
        args.opt("--key-stddev", self.key_stddev.as_ref());
        args.opt("--key-median", self.key_median.as_ref());
        args.opt("--key-zipf-exp", self.key_zipf_exp.as_ref());

        // WAIT options
        if self.wait_ratio != defaults.wait_ratio {
            args.pair("--wait-ratio", &self.wait_ratio);
        }
        args.opt("--num-slaves", self.num_slaves.as_ref());
        args.opt("--wait-timeout", self.wait_timeout.as_ref());

        // Arbitrary commands, in declaration order
        for cmd in &self.commands {
            args.pair("--command", &cmd.command);
            if cmd.ratio != 1 {
                args.pair("--command-ratio", cmd.ratio);
            }
            if cmd.key_pattern != CommandKeyPattern::default() {
                args.pair("--command-key-pattern", cmd.key_pattern);
            }
        }

        // Output and debug options
        args.flag_if("--debug", self.debug);
        args.flag_if("--show-config", self.show_config);
        args.flag_if("--hide-histogram", self.hide_histogram);
        args.opt("--print-percentiles", self.print_percentiles.as_ref());
        args.flag_if("--print-all-runs", self.print_all_runs);
        args.opt("--client-stats", self.client_stats.as_ref());
        args.opt("--out-file", self.out_file.as_ref());
        args.opt("--json-out-file", self.json_out_file.as_ref());
        args.opt("--hdr-file-prefix", self.hdr_file_prefix.as_ref());
        args.flag_if("--cluster-mode", self.cluster_mode);

        args.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArbitraryCommand, CommandKeyPattern, Protocol, RequestCount};

    #[test]
    fn default_config_encodes_to_nothing() {
        assert!(BenchmarkConfig::default().to_args().is_empty());
    }

    #[test]
    fn changed_fields_emit_flag_value_pairs() {
        let config = BenchmarkConfig {
            server: "10.0.0.5".to_string(),
            port: 6380,
            clients: 100,
            ..Default::default()
        };
        assert_eq!(
            config.to_args(),
            vec!["--server", "10.0.0.5", "--port", "6380", "--clients", "100"]
        );
    }

    #[test]
    fn boolean_fields_emit_bare_flags() {
        let config = BenchmarkConfig {
            tls: true,
            tls_skip_verify: true,
            cluster_mode: true,
            ..Default::default()
        };
        assert_eq!(
            config.to_args(),
            vec!["--tls", "--tls-skip-verify", "--cluster-mode"]
        );
    }

    #[test]
    fn optional_fields_emit_only_when_present() {
        let config = BenchmarkConfig {
            authenticate: Some("user:secret".to_string()),
            select_db: Some(0),
            ..Default::default()
        };
        assert_eq!(
            config.to_args(),
            vec!["--authenticate", "user:secret", "--select-db", "0"]
        );
    }

    #[test]
    fn emission_order_follows_option_groups() {
        // Built "backwards" relative to the output order
        let config = BenchmarkConfig {
            cluster_mode: true,
            key_prefix: "bench:".to_string(),
            threads: 8,
            tls: true,
            port: 7000,
            ..Default::default()
        };
        assert_eq!(
            config.to_args(),
            vec![
                "--port",
                "7000",
                "--tls",
                "--threads",
                "8",
                "--key-prefix",
                "bench:",
                "--cluster-mode",
            ]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let config = BenchmarkConfig {
            protocol: Protocol::MemcacheText,
            requests: RequestCount::AllKeys,
            data_size: Some(512),
            ..Default::default()
        };
        assert_eq!(config.to_args(), config.clone().to_args());
        assert_eq!(
            config.to_args(),
            vec![
                "--protocol",
                "memcache_text",
                "--requests",
                "allkeys",
                "--data-size",
                "512",
            ]
        );
    }

    #[test]
    fn commands_emit_in_order_with_sub_defaults_omitted() {
        let config = BenchmarkConfig {
            commands: vec![
                ArbitraryCommand::new("SET __key__ __data__"),
                ArbitraryCommand {
                    command: "GET __key__".to_string(),
                    ratio: 9,
                    key_pattern: CommandKeyPattern::Gaussian,
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            config.to_args(),
            vec![
                "--command",
                "SET __key__ __data__",
                "--command",
                "GET __key__",
                "--command-ratio",
                "9",
                "--command-key-pattern",
                "G",
            ]
        );
    }

    #[test]
    fn zero_valued_gates_stay_silent() {
        // multi_key_get and data_offset only emit when positive
        let config = BenchmarkConfig {
            multi_key_get: 0,
            data_offset: 0,
            ..Default::default()
        };
        assert!(config.to_args().is_empty());

        let config = BenchmarkConfig {
            multi_key_get: 16,
            data_offset: 8,
            ..Default::default()
        };
        assert_eq!(
            config.to_args(),
            vec!["--multi-key-get", "16", "--data-offset", "8"]
        );
    }
}
