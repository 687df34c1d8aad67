//! # StatsLib
//!
//! StatsLib drives the `cache_emulator` binary and collects the counters it reports
//!
//! It builds the emulator's command line from a set of parameters, runs it as a child process,
//! and extracts the read/write hit and miss counts from its output. The emulator itself is an
//! external program; nothing here models a cache
//!
//! Callers should go through the [`emulator::Emulator`] trait, so the process backed
//! implementation can be replaced without touching the rest of the code

/// Contains the counters reported by the emulator
pub mod stats;

/// Contains the run parameters and the JSON batch format
pub mod config;

/// Contains the command line construction for the emulator binary
pub mod command;

/// Contains the parser for the emulator's output
pub mod parse;

/// Contains the emulator trait, the process backed implementation and batch runs
pub mod emulator;

/// Contains the error type shared by everything in the library
pub mod error;

/// Reading and writing saved emulator transcripts
pub mod io;


pub use config::EmulatorParams;
pub use emulator::{get_stats, Emulator, ProcessEmulator};
pub use error::StatsError;
pub use stats::{AccessStats, Counter};
