#![warn(missing_docs)]
//! tierbench CLI library
//!
//! Wires the configuration codec and the report parser into a command-line
//! tool: print generated memtier_benchmark invocations, validate
//! configuration files, parse report text into statistics, and manage
//! persisted presets and run history.

mod history;
mod presets;
mod store;

pub use history::{DEFAULT_MAX_RECORDS, RunHistory, RunRecord, RunStatus};
pub use presets::{ConfigPreset, PresetStore};
pub use store::{FileStore, KvStore, MemoryStore, StoreError};

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tierbench_config::{BenchmarkConfig, RequestCount};
use tierbench_report::{OutputFormat, format_stats_human, generate_json_stats, parse_output};
use tracing::{debug, info};

/// tierbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "tierbench")]
#[command(author, version, about = "Configuration and report toolkit for memtier_benchmark")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Store file for presets and run history
    #[arg(long, global = true, default_value = "tierbench.json")]
    pub store: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the memtier_benchmark invocation for a configuration
    Args {
        /// Configuration source
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Validate a configuration and report every violation
    Check {
        /// Configuration source
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Parse benchmark report text into statistics
    Parse {
        /// Report file (stdin when omitted)
        file: Option<PathBuf>,
        /// Output format: human, json
        #[arg(long, default_value = "human")]
        format: String,
        /// Record the parsed run in the store
        #[arg(long)]
        save: bool,
        /// Configuration file to attach to a saved run
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Manage configuration presets
    #[command(subcommand)]
    Preset(PresetCommand),
    /// Manage recorded runs
    #[command(subcommand)]
    Results(ResultsCommand),
}

/// Preset management subcommands
#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// Save a configuration file as a named preset
    Save {
        /// Preset name (an existing preset with this name is updated)
        name: String,
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List stored presets
    List,
    /// Print a preset's configuration as TOML
    Show {
        /// Preset id or name
        name: String,
    },
    /// Delete a preset
    Delete {
        /// Preset id or name
        name: String,
    },
}

/// Run-history subcommands
#[derive(Subcommand, Debug)]
pub enum ResultsCommand {
    /// List recorded runs, newest first
    List,
    /// Delete one recorded run
    Delete {
        /// Record id
        id: String,
    },
    /// Drop the whole run history
    Clear,
}

/// Configuration source: an optional TOML file plus common flag overrides.
/// Flags win over the file, the file wins over defaults — the same layering
/// the configuration file itself applies over built-in defaults.
#[derive(ClapArgs, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file (TOML); built-in defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server address
    #[arg(long)]
    pub server: Option<String>,

    /// Server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Connections per thread
    #[arg(long)]
    pub clients: Option<u32>,

    /// Worker threads
    #[arg(long)]
    pub threads: Option<u32>,

    /// Requests per client, or "allkeys"
    #[arg(long)]
    pub requests: Option<String>,

    /// SET:GET ratio, e.g. "1:10"
    #[arg(long)]
    pub ratio: Option<String>,

    /// Requests pipelined per connection
    #[arg(long)]
    pub pipeline: Option<u32>,

    /// Fixed object size in bytes
    #[arg(long)]
    pub data_size: Option<u32>,

    /// Enable TLS
    #[arg(long)]
    pub tls: bool,

    /// Run against a Redis cluster
    #[arg(long)]
    pub cluster_mode: bool,
}

impl ConfigArgs {
    /// Resolve to a complete configuration: file (or defaults), then flags.
    pub fn resolve(&self) -> anyhow::Result<BenchmarkConfig> {
        let mut config = match &self.config {
            Some(path) => BenchmarkConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => BenchmarkConfig::default(),
        };

        if let Some(server) = &self.server {
            config.server = server.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(clients) = self.clients {
            config.clients = clients;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(requests) = &self.requests {
            config.requests = if requests == "allkeys" {
                RequestCount::AllKeys
            } else {
                RequestCount::Count(
                    requests
                        .parse()
                        .with_context(|| format!("invalid --requests value {requests:?}"))?,
                )
            };
        }
        if let Some(ratio) = &self.ratio {
            config.ratio = ratio.clone();
        }
        if let Some(pipeline) = self.pipeline {
            config.pipeline = pipeline;
        }
        if let Some(data_size) = self.data_size {
            config.data_size = Some(data_size);
        }
        if self.tls {
            config.tls = true;
        }
        if self.cluster_mode {
            config.cluster_mode = true;
        }

        Ok(config)
    }
}

/// Run the tierbench CLI. Entry point for the `tierbench` binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "tierbench=debug"
    } else {
        "tierbench=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Args { config } => print_args(&config),
        Commands::Check { config } => check_config(&config),
        Commands::Parse {
            file,
            format,
            save,
            config,
        } => parse_report(file.as_deref(), &format, save, config.as_deref(), &cli.store),
        Commands::Preset(cmd) => manage_presets(cmd, &cli.store),
        Commands::Results(cmd) => manage_results(cmd, &cli.store),
    }
}

fn print_args(source: &ConfigArgs) -> anyhow::Result<()> {
    let config = source.resolve()?;
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("error: {error}");
        }
        bail!("configuration has {} validation error(s)", errors.len());
    }

    let mut invocation = vec!["memtier_benchmark".to_string()];
    invocation.extend(config.to_args());
    println!("{}", shell_join(&invocation));
    Ok(())
}

fn check_config(source: &ConfigArgs) -> anyhow::Result<()> {
    let config = source.resolve()?;
    let errors = config.validate();
    if errors.is_empty() {
        println!("configuration OK");
        return Ok(());
    }
    for error in &errors {
        println!("✗ {error}");
    }
    bail!("{} validation error(s)", errors.len());
}

fn parse_report(
    file: Option<&Path>,
    format: &str,
    save: bool,
    config_path: Option<&Path>,
    store_path: &Path,
) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading report {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    debug!(bytes = text.len(), "scanning report text");

    let format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let Some(stats) = parse_output(&text) else {
        bail!("no statistics found in input");
    };

    match format {
        OutputFormat::Human => print!("{}", format_stats_human(&stats)),
        OutputFormat::Json => println!("{}", generate_json_stats(&stats)?),
    }

    if save {
        let config = match config_path {
            Some(path) => BenchmarkConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => BenchmarkConfig::default(),
        };
        let record = RunRecord::from_output(config, text);
        let id = record.id.clone();
        let mut store = FileStore::open(store_path)?;
        RunHistory::new(&mut store).push(record)?;
        info!(id = %id, "run recorded");
    }

    Ok(())
}

fn manage_presets(cmd: PresetCommand, store_path: &Path) -> anyhow::Result<()> {
    let mut store = FileStore::open(store_path)?;
    let mut presets = PresetStore::new(&mut store);

    match cmd {
        PresetCommand::Save {
            name,
            config,
            description,
        } => {
            let config = BenchmarkConfig::load(&config)
                .with_context(|| format!("loading configuration {}", config.display()))?;
            let errors = config.validate();
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("error: {error}");
                }
                bail!("refusing to save an invalid configuration");
            }

            let preset = match presets.find(&name)? {
                Some(mut existing) => {
                    existing.config = config;
                    if let Some(description) = description {
                        existing.description = description;
                    }
                    existing
                }
                None => ConfigPreset::new(name, description.unwrap_or_default(), config),
            };
            let (id, name) = (preset.id.clone(), preset.name.clone());
            presets.save(preset)?;
            println!("saved preset {name} ({id})");
        }
        PresetCommand::List => {
            let all = presets.list()?;
            if all.is_empty() {
                println!("no presets stored");
            }
            for preset in all {
                println!(
                    "{}  {}  (updated {})",
                    preset.id,
                    preset.name,
                    preset.updated_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        PresetCommand::Show { name } => {
            let Some(preset) = presets.find(&name)? else {
                bail!("no preset named {name:?}");
            };
            if !preset.description.is_empty() {
                println!("# {}", preset.description);
            }
            print!("{}", toml::to_string_pretty(&preset.config)?);
        }
        PresetCommand::Delete { name } => {
            let Some(preset) = presets.find(&name)? else {
                bail!("no preset named {name:?}");
            };
            presets.delete(&preset.id)?;
            println!("deleted preset {}", preset.name);
        }
    }

    Ok(())
}

fn manage_results(cmd: ResultsCommand, store_path: &Path) -> anyhow::Result<()> {
    let mut store = FileStore::open(store_path)?;
    let mut history = RunHistory::new(&mut store);

    match cmd {
        ResultsCommand::List => {
            let records = history.list()?;
            if records.is_empty() {
                println!("no runs recorded");
            }
            for record in records {
                let status = match record.status {
                    RunStatus::Running => "running",
                    RunStatus::Completed => "completed",
                    RunStatus::Failed => "failed",
                };
                let throughput = record
                    .stats
                    .as_ref()
                    .map(|s| format!("{:.2} ops/sec", s.requests_per_second))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {}  {:<9}  {}",
                    record.id,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    status,
                    throughput
                );
            }
        }
        ResultsCommand::Delete { id } => {
            if !history.delete(&id)? {
                bail!("no run with id {id:?}");
            }
            println!("deleted run {id}");
        }
        ResultsCommand::Clear => {
            history.clear()?;
            println!("run history cleared");
        }
    }

    Ok(())
}

/// Join arguments for display, single-quoting anything with whitespace.
fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.contains(char::is_whitespace) || arg.is_empty() {
                format!("'{arg}'")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_win_over_file_defaults() {
        let source = ConfigArgs {
            server: Some("cache-1".to_string()),
            port: Some(7001),
            requests: Some("allkeys".to_string()),
            tls: true,
            ..Default::default()
        };
        let config = source.resolve().unwrap();
        assert_eq!(config.server, "cache-1");
        assert_eq!(config.port, 7001);
        assert_eq!(config.requests, RequestCount::AllKeys);
        assert!(config.tls);
        // Untouched fields keep their defaults
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn bad_requests_override_is_rejected() {
        let source = ConfigArgs {
            requests: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(source.resolve().is_err());
    }

    #[test]
    fn shell_join_quotes_spaced_arguments() {
        let args = vec![
            "memtier_benchmark".to_string(),
            "--command".to_string(),
            "SET __key__ __data__".to_string(),
        ];
        assert_eq!(
            shell_join(&args),
            "memtier_benchmark --command 'SET __key__ __data__'"
        );
    }
}
