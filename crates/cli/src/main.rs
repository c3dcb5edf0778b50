//! Cache/prefetcher simulator CLI.
//!
//! This binary provides a single entry point for simulation runs. It
//! performs:
//! 1. **Configuration:** Built-in defaults, optionally overridden by a JSON
//!    config file and command-line flags.
//! 2. **Run:** Drives a synthetic workload through the cache model and
//!    prints the collected statistics.

use clap::{Parser, Subcommand};
use std::{fs, process};

use prefetch_core::config::{Config, Prefetcher};
use prefetch_core::sim::{Simulator, Workload, WorkloadKind};

#[derive(Parser, Debug)]
#[command(
    name = "pfsim",
    author,
    version,
    about = "Cycle-level cache and prefetcher simulator",
    long_about = "Drive a synthetic memory workload through a simulated L1 data cache.\n\n\
        Configuration uses built-in defaults; pass --config <file.json> to override them.\n\n\
        Examples:\n  \
        pfsim run --workload ascending --prefetcher stream\n  \
        pfsim run --workload interleaved --accesses 5000000 --prefetcher next-line\n  \
        pfsim run --config sweeps/l1d.json --stats summary,prefetch"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one workload through the simulated cache.
    Run {
        /// Workload kind: ascending, descending, strided, random, interleaved.
        #[arg(short, long, default_value = "ascending")]
        workload: WorkloadKind,

        /// Prefetcher: none, next-line, or stream (overrides the config file).
        #[arg(short, long)]
        prefetcher: Option<String>,

        /// Number of demand accesses to simulate (overrides the config file).
        #[arg(short, long)]
        accesses: Option<u64>,

        /// PRNG seed (overrides the config file).
        #[arg(long)]
        seed: Option<u64>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<String>,

        /// Comma-separated statistics sections to print (default: all).
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            workload,
            prefetcher,
            accesses,
            seed,
            config,
            stats,
        }) => cmd_run(workload, prefetcher, accesses, seed, config, stats),
        None => {
            eprintln!("pfsim — pass a subcommand");
            eprintln!();
            eprintln!("  pfsim run --workload ascending --prefetcher stream");
            eprintln!("  pfsim run --config sweeps/l1d.json");
            eprintln!();
            eprintln!("  pfsim --help  for full options");
            process::exit(1);
        }
    }
}

/// Runs the simulator: resolves the configuration, builds the workload, and
/// loops until the requested access count is reached.
fn cmd_run(
    workload: WorkloadKind,
    prefetcher: Option<String>,
    accesses: Option<u64>,
    seed: Option<u64>,
    config_path: Option<String>,
    stats: Vec<String>,
) {
    let mut config = match config_path {
        Some(path) => load_config(&path),
        None => Config::default(),
    };

    if let Some(name) = prefetcher {
        config.cache.prefetcher = match name.to_ascii_lowercase().as_str() {
            "none" => Prefetcher::None,
            "next-line" | "next_line" | "nextline" => Prefetcher::NextLine,
            "stream" => Prefetcher::Stream,
            other => {
                eprintln!("Error: unknown prefetcher '{}' (expected none, next-line, or stream)", other);
                process::exit(1);
            }
        };
    }
    if let Some(n) = accesses {
        config.general.accesses = n;
    }
    if let Some(s) = seed {
        config.general.seed = s;
    }

    println!(
        "Configuration: L1-D {} KiB {}-way, {}-byte lines, prefetcher {:?}",
        config.cache.size_bytes / 1024,
        config.cache.ways,
        config.cache.line_bytes,
        config.cache.prefetcher,
    );
    println!(
        "  Workload: {}  Accesses: {}  Seed: {}",
        workload, config.general.accesses, config.general.seed
    );

    let mut sim = Simulator::new(&config);
    let mut workload = Workload::new(workload, config.cache.line_bytes, config.general.seed);

    sim.run(&mut workload, config.general.accesses);
    sim.stats.print_sections(&stats);
}

/// Loads a JSON configuration file, exiting with a message on failure.
fn load_config(path: &str) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read config '{}': {}", path, e);
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not parse config '{}': {}", path, e);
        process::exit(1);
    })
}
