use std::process::Output;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use crate::command::EmulatorCommand;
use crate::config::{BatchConfig, EmulatorParams};
use crate::error::StatsError;
use crate::parse::parse_stats;
use crate::stats::AccessStats;

/// Something which can run a cache emulation and report its counters
///
/// The process backed implementation is the only one provided, but callers should depend on
/// this trait so the emulator can be swapped for an in-process one
pub trait Emulator {
    /// Runs the emulator for one set of parameters, blocking until it finishes
    fn run(&self, params: &EmulatorParams) -> Result<AccessStats, StatsError>;
}

/// Runs the emulator binary as a child process and parses what it prints
#[derive(Debug, Clone, Default)]
pub struct ProcessEmulator {
    command: EmulatorCommand,
}

impl ProcessEmulator {
    pub fn new(command: EmulatorCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &EmulatorCommand {
        &self.command
    }

    /// Runs the emulator and returns its standard output without parsing it
    ///
    /// Fails if the program can't be started, exits unsuccessfully, or prints something that
    /// isn't UTF-8
    pub fn run_raw(&self, params: &EmulatorParams) -> Result<String, StatsError> {
        debug!("Spawning emulator: {}", self.command.display(params));
        let output = self
            .command
            .to_command(params)
            .output()
            .map_err(|source| StatsError::Spawn {
                program: self.command.program().display().to_string(),
                source,
            })?;
        let Output { status, stdout, stderr } = output;
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
        if !status.success() {
            return Err(StatsError::ExitStatus { status, stderr });
        }
        if !stderr.is_empty() {
            warn!("Emulator wrote to stderr: {stderr}");
        }
        let stdout = String::from_utf8(stdout)?;
        trace!("Emulator output:\n{stdout}");
        Ok(stdout)
    }
}

impl Emulator for ProcessEmulator {
    fn run(&self, params: &EmulatorParams) -> Result<AccessStats, StatsError> {
        let stats = parse_stats(&self.run_raw(params)?)?;
        info!(
            "Emulated {} ({}-way, {}B blocks, {}B cache, {}): {} accesses",
            params.algorithm,
            params.associativity,
            params.block_size,
            params.cache_size,
            params.replacement,
            stats.accesses()
        );
        Ok(stats)
    }
}

impl From<&BatchConfig> for ProcessEmulator {
    fn from(config: &BatchConfig) -> Self {
        let command = match &config.emulator {
            Some(path) => EmulatorCommand::new(path.clone()),
            None => EmulatorCommand::default(),
        };
        Self::new(command.with_leading_args(config.leading_args.iter().cloned()))
    }
}

/// Runs the emulator at its default location
pub fn get_stats(params: &EmulatorParams) -> Result<AccessStats, StatsError> {
    ProcessEmulator::default().run(params)
}

/// The parameters of a run alongside its result
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct RunRecord {
    pub params: EmulatorParams,
    pub stats: AccessStats,
}

/// Runs every entry of a batch in order, stopping at the first failure
pub fn run_batch<E: Emulator + ?Sized>(emulator: &E, config: &BatchConfig) -> Result<Vec<RunRecord>, StatsError> {
    config
        .runs
        .iter()
        .enumerate()
        .map(|(i, params)| {
            debug!("Batch run {} of {}", i + 1, config.runs.len());
            Ok(RunRecord {
                params: params.clone(),
                stats: emulator.run(params)?,
            })
        })
        .collect()
}
