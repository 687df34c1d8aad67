use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use clap::{ArgAction, Parser};
use log::debug;
use serde::Serialize;
use statslib::command::{EmulatorCommand, DEFAULT_EMULATOR_PATH};
use statslib::config::{Algorithm, BatchConfig, EmulatorParams, ReplacementPolicy};
use statslib::emulator::{run_batch, Emulator, ProcessEmulator};
use statslib::io::{replay, write_transcript};
use statslib::parse::parse_stats;

#[cfg(test)]
mod test;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Runs the cache emulator and reports its read/write hits and misses"))]
struct Args {
    /// n-way associativity, 1 is direct mapped
    #[arg(short = 'n', long, default_value_t = 1)]
    associativity: u64,

    /// Block size in bytes
    #[arg(short, long, default_value_t = 8)]
    block_size: u64,

    /// Cache size in bytes
    #[arg(short, long, default_value_t = 65536)]
    cache_size: u64,

    /// Replacement policy token (LRU, FIFO, random, or anything the emulator accepts)
    #[arg(short, long, default_value = "LRU")]
    replacement: ReplacementPolicy,

    /// Workload (dot, mxm, mxm-block, or anything the emulator accepts)
    #[arg(short, long, default_value = "mxm")]
    algorithm: Algorithm,

    /// Workload size, the emulator's memory size is derived from it
    #[arg(short, long, default_value_t = 64)]
    test_size: u64,

    /// Path to the emulator binary
    #[arg(short, long, default_value = DEFAULT_EMULATOR_PATH)]
    emulator: PathBuf,

    /// Argument placed before the emulator flags, repeat for more than one (e.g. to run it through a wrapper)
    #[arg(long = "emulator-arg", allow_hyphen_values = true)]
    emulator_args: Vec<String>,

    /// Run every entry of a JSON batch file instead of a single run
    #[arg(long, conflicts_with = "replay")]
    config: Option<PathBuf>,

    /// Parse a saved emulator transcript instead of running the emulator
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Save the emulator's raw output for a single run
    #[arg(long, conflicts_with_all = ["config", "replay"])]
    save_output: Option<PathBuf>,

    /// Pass parameters to the emulator without checking them first
    #[arg(long)]
    no_validate: bool,

    #[arg(short, long)]
    performance: bool,

    /// Debug logging, `-d false` turns it off in debug builds
    #[arg(short, long, action = ArgAction::Set, num_args = 0..=1, default_value_t = DEBUG_DEFAULT, default_missing_value = "true")]
    debug: bool,
}

impl Args {
    fn params(&self) -> EmulatorParams {
        EmulatorParams {
            associativity: self.associativity,
            block_size: self.block_size,
            cache_size: self.cache_size,
            replacement: self.replacement.clone(),
            algorithm: self.algorithm.clone(),
            test_size: self.test_size,
        }
    }
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    #[cfg(debug_assertions)]
    debug!("Running the debug binary, debug mode is enabled by default");

    println!("{}", run(&args)?);
    if args.performance {
        let total_time = Instant::now() - start;
        // stderr, stdout only carries the JSON
        eprintln!("Total execution time (includes emulator start up and output parsing): {}s", total_time.as_nanos() as f64 / 1e9);
    }
    Ok(())
}

/// Does whatever the arguments ask for and returns the JSON to print
fn run(args: &Args) -> Result<String, String> {
    if let Some(path) = &args.replay {
        let stats = replay(path).map_err(|e| format!("Couldn't replay the transcript: {e}"))?;
        return to_json(&stats);
    }
    if let Some(path) = &args.config {
        let config_file = File::open(path).map_err(|e| format!("Couldn't open the config file at path {}: {e}", path.display()))?;
        let mut config = BatchConfig::from_reader(BufReader::new(config_file)).map_err(|e| format!("Couldn't parse the config file: {e}"))?;
        debug!("Parsed batch configuration: {config:?}");
        if !args.no_validate {
            for (i, params) in config.runs.iter().enumerate() {
                params.validate().map_err(|e| format!("Run {} of the batch is invalid: {e}", i + 1))?;
            }
        }
        // The batch's own emulator wins over the command line one
        if config.emulator.is_none() {
            config.emulator = Some(args.emulator.clone());
            if config.leading_args.is_empty() {
                config.leading_args = args.emulator_args.clone();
            }
        }
        let emulator = ProcessEmulator::from(&config);
        let records = run_batch(&emulator, &config).map_err(|e| format!("Batch run failed: {e}"))?;
        return to_json(&records);
    }

    let params = args.params();
    debug!("Parsed parameters: {params:?}");
    if !args.no_validate {
        params.validate().map_err(|e| e.to_string())?;
    }
    let command = EmulatorCommand::new(args.emulator.clone()).with_leading_args(args.emulator_args.iter().cloned());
    let emulator = ProcessEmulator::new(command);
    let stats = match &args.save_output {
        Some(path) => {
            let output = emulator.run_raw(&params).map_err(|e| format!("Emulation failed: {e}"))?;
            write_transcript(path, &output).map_err(|e| format!("Couldn't save the transcript: {e}"))?;
            parse_stats(&output).map_err(|e| format!("Emulation failed: {e}"))?
        }
        None => emulator.run(&params).map_err(|e| format!("Emulation failed: {e}"))?,
    };
    to_json(&stats)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Couldn't serialise the output {e}"))
}
