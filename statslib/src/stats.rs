use serde::{Deserialize, Serialize};

/// One of the four counters the emulator reports
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Counter {
    ReadHits,
    ReadMisses,
    WriteHits,
    WriteMisses,
}

impl Counter {
    /// Every counter, in the order the emulator prints them
    pub const ALL: [Counter; 4] = [
        Counter::ReadHits,
        Counter::ReadMisses,
        Counter::WriteHits,
        Counter::WriteMisses,
    ];

    /// The exact label the emulator prints before the value
    pub const fn label(self) -> &'static str {
        match self {
            Counter::ReadHits => "read hits",
            Counter::ReadMisses => "read misses",
            Counter::WriteHits => "write hits",
            Counter::WriteMisses => "write misses",
        }
    }
}

/// The counters from a single emulator run. Serialises to an object keyed by the emulator's labels
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct AccessStats {
    #[serde(rename = "read hits")]
    pub read_hits: u64,
    #[serde(rename = "read misses")]
    pub read_misses: u64,
    #[serde(rename = "write hits")]
    pub write_hits: u64,
    #[serde(rename = "write misses")]
    pub write_misses: u64,
}

impl AccessStats {
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::ReadHits => self.read_hits,
            Counter::ReadMisses => self.read_misses,
            Counter::WriteHits => self.write_hits,
            Counter::WriteMisses => self.write_misses,
        }
    }

    pub(crate) fn set(&mut self, counter: Counter, value: u64) {
        match counter {
            Counter::ReadHits => self.read_hits = value,
            Counter::ReadMisses => self.read_misses = value,
            Counter::WriteHits => self.write_hits = value,
            Counter::WriteMisses => self.write_misses = value,
        }
    }

    /// Yields `(label, value)` pairs in the emulator's order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        Counter::ALL.iter().map(move |c| (c.label(), self.get(*c)))
    }

    pub fn reads(&self) -> u64 {
        self.read_hits + self.read_misses
    }

    pub fn writes(&self) -> u64 {
        self.write_hits + self.write_misses
    }

    pub fn accesses(&self) -> u64 {
        self.reads() + self.writes()
    }

    /// Hits over all accesses, or None if nothing was accessed
    pub fn hit_ratio(&self) -> Option<f64> {
        match self.accesses() {
            0 => None,
            total => Some((self.read_hits + self.write_hits) as f64 / total as f64),
        }
    }
}
