use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use crate::config::EmulatorParams;

/// Where the emulator binary lives when nothing else is configured
pub const DEFAULT_EMULATOR_PATH: &str = "./target/release/cache_emulator";

/// Builds the command line for the emulator binary
///
/// Leading arguments go between the program and the emulator flags, which lets the emulator be
/// started through another program (`sh -c`, `taskset`, `valgrind` and so on)
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EmulatorCommand {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl Default for EmulatorCommand {
    fn default() -> Self {
        Self::new(DEFAULT_EMULATOR_PATH)
    }
}

impl EmulatorCommand {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn leading_args(&self) -> &[OsString] {
        &self.leading_args
    }

    /// The emulator flags for a set of parameters, always in the order
    /// `-n -b -c -r -a -m -t`
    ///
    /// # Examples
    ///
    /// ```
    /// use statslib::command::EmulatorCommand;
    /// use statslib::config::EmulatorParams;
    /// let args = EmulatorCommand::default().args(&EmulatorParams::default());
    /// assert_eq!(args.join(" "), "-n 1 -b 8 -c 65536 -r LRU -a mxm -m 16384 -t 64");
    /// ```
    pub fn args(&self, params: &EmulatorParams) -> Vec<String> {
        vec![
            "-n".to_string(), params.associativity.to_string(),
            "-b".to_string(), params.block_size.to_string(),
            "-c".to_string(), params.cache_size.to_string(),
            "-r".to_string(), params.replacement.to_string(),
            "-a".to_string(), params.algorithm.to_string(),
            "-m".to_string(), params.ram_size().to_string(),
            "-t".to_string(), params.test_size.to_string(),
        ]
    }

    /// A ready to spawn command for a set of parameters
    pub fn to_command(&self, params: &EmulatorParams) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd.args(self.args(params));
        cmd
    }

    /// The full command line as a single string, for logging
    pub fn display(&self, params: &EmulatorParams) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.leading_args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.extend(self.args(params));
        parts.join(" ")
    }
}
