use std::convert::Infallible;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::StatsError;

/// Word size used by the emulator's memory, in bytes. Blocks hold a whole number of words
pub const WORD_SIZE: u64 = 8;

/// Smallest memory the emulator is ever given, in words
pub const MIN_RAM_SIZE: u64 = 1 << 10;

/// Parameters for a single emulator run
///
/// Every field is optional in JSON, missing fields take the emulator harness defaults
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorParams {
    /// n-way associativity, 1 is a direct mapped cache
    pub associativity: u64,
    /// Block size in bytes
    pub block_size: u64,
    /// Total cache size in bytes
    pub cache_size: u64,
    pub replacement: ReplacementPolicy,
    pub algorithm: Algorithm,
    /// Size of the workload, the memory given to the emulator is derived from this
    pub test_size: u64,
}

impl Default for EmulatorParams {
    fn default() -> Self {
        Self {
            associativity: 1,
            block_size: 8,
            cache_size: 65536,
            replacement: ReplacementPolicy::LeastRecentlyUsed,
            algorithm: Algorithm::MatrixMultiply,
            test_size: 64,
        }
    }
}

impl EmulatorParams {
    /// The memory size passed to the emulator for these parameters
    pub fn ram_size(&self) -> u64 {
        ram_size(self.test_size)
    }

    /// Checks the parameters describe a cache the emulator can model
    ///
    /// The emulator splits memory into 8 byte words and the cache into
    /// `cache_size / block_size / associativity` sets, so block sizes must be a power of two
    /// number of words and the cache must divide evenly into sets.
    pub fn validate(&self) -> Result<(), StatsError> {
        let fields = [
            ("associativity", self.associativity),
            ("block size", self.block_size),
            ("cache size", self.cache_size),
            ("test size", self.test_size),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| *value == 0) {
            return Err(StatsError::InvalidParams(format!("{name} must be positive")));
        }
        if !self.block_size.is_power_of_two() {
            return Err(StatsError::InvalidParams(format!("block size {} isn't a power of two", self.block_size)));
        }
        if self.block_size % WORD_SIZE != 0 {
            return Err(StatsError::InvalidParams(format!(
                "block size {} isn't a whole number of {WORD_SIZE} byte words",
                self.block_size
            )));
        }
        let set_bytes = self.block_size.checked_mul(self.associativity)
            .ok_or_else(|| StatsError::InvalidParams("block size * associativity overflows".to_string()))?;
        if self.cache_size % set_bytes != 0 {
            return Err(StatsError::InvalidParams(format!(
                "cache size {} can't be split into sets of {} bytes ({}-way, {} byte blocks)",
                self.cache_size, set_bytes, self.associativity, self.block_size
            )));
        }
        Ok(())
    }
}

/// Memory size, in words, for a workload of `test_size`: `max(4 * test_size^2, 1024)`
///
/// # Examples
///
/// ```
/// use statslib::config::ram_size;
/// assert_eq!(ram_size(64), 16384);
/// assert_eq!(ram_size(1), 1024);
/// ```
pub fn ram_size(test_size: u64) -> u64 {
    test_size
        .saturating_mul(test_size)
        .saturating_mul(4)
        .max(MIN_RAM_SIZE)
}

/// The replacement policy token given to the emulator
///
/// Tokens the emulator doesn't know are passed through untouched
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReplacementPolicy {
    LeastRecentlyUsed,
    FirstInFirstOut,
    Random,
    Other(String),
}

impl FromStr for ReplacementPolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "LRU" => ReplacementPolicy::LeastRecentlyUsed,
            "FIFO" => ReplacementPolicy::FirstInFirstOut,
            "random" => ReplacementPolicy::Random,
            other => ReplacementPolicy::Other(other.to_string()),
        })
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementPolicy::LeastRecentlyUsed => f.write_str("LRU"),
            ReplacementPolicy::FirstInFirstOut => f.write_str("FIFO"),
            ReplacementPolicy::Random => f.write_str("random"),
            ReplacementPolicy::Other(token) => f.write_str(token),
        }
    }
}

impl From<String> for ReplacementPolicy {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(policy) => policy,
            Err(never) => match never {},
        }
    }
}

impl From<ReplacementPolicy> for String {
    fn from(policy: ReplacementPolicy) -> Self {
        policy.to_string()
    }
}

/// The workload the emulator runs
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    DotProduct,
    MatrixMultiply,
    BlockMatrixMultiply,
    Other(String),
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "dot" => Algorithm::DotProduct,
            "mxm" => Algorithm::MatrixMultiply,
            "mxm-block" => Algorithm::BlockMatrixMultiply,
            other => Algorithm::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::DotProduct => f.write_str("dot"),
            Algorithm::MatrixMultiply => f.write_str("mxm"),
            Algorithm::BlockMatrixMultiply => f.write_str("mxm-block"),
            Algorithm::Other(token) => f.write_str(token),
        }
    }
}

impl From<String> for Algorithm {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(algorithm) => algorithm,
            Err(never) => match never {},
        }
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.to_string()
    }
}

/// A list of runs to make one after another, usually parsed from JSON
#[derive(Debug, Default, Deserialize)]
pub struct BatchConfig {
    /// Overrides the default emulator path
    #[serde(default)]
    pub emulator: Option<PathBuf>,
    /// Arguments placed before the emulator flags, e.g. for a wrapper program
    #[serde(default)]
    pub leading_args: Vec<String>,
    pub runs: Vec<EmulatorParams>,
}

impl BatchConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StatsError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
