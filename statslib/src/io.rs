use std::fs;
use std::path::Path;
use crate::error::StatsError;
use crate::parse::parse_stats;
use crate::stats::AccessStats;

/// Reads a saved emulator transcript
pub fn read_transcript<P: AsRef<Path>>(path: P) -> Result<String, StatsError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| StatsError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Saves an emulator transcript so it can be replayed later
pub fn write_transcript<P: AsRef<Path>>(path: P, output: &str) -> Result<(), StatsError> {
    let path = path.as_ref();
    fs::write(path, output).map_err(|source| StatsError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parses the counters from a saved transcript, without running the emulator
pub fn replay<P: AsRef<Path>>(path: P) -> Result<AccessStats, StatsError> {
    parse_stats(&read_transcript(path)?)
}
