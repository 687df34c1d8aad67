use lazy_static::lazy_static;
use regex::Regex;
use crate::error::StatsError;
use crate::stats::{AccessStats, Counter};

lazy_static! {
    // One pattern per counter, `<label>\t<digits>`, compiled once
    static ref COUNTER_PATTERNS: Vec<(Counter, Regex)> = Counter::ALL
        .iter()
        .map(|c| {
            let pattern = format!(r"{}\t([0-9]+)", regex::escape(c.label()));
            (*c, Regex::new(&pattern).expect("counter patterns are valid regexes"))
        })
        .collect();
}

/// Extracts the four counters from the emulator's output
///
/// Each counter is read from the first `<label>\t<digits>` found anywhere in the text, so other
/// lines and surrounding text are ignored. Fails if any counter is missing; a partial result is
/// never returned.
///
/// # Arguments
///
/// * `output`: The emulator's standard output
///
/// returns: Result<AccessStats, StatsError>
///
/// # Examples
///
/// ```
/// use statslib::parse::parse_stats;
/// let stats = parse_stats("read hits\t10\nread misses\t2\nwrite hits\t5\nwrite misses\t1").unwrap();
/// assert_eq!(stats.read_hits, 10);
/// assert_eq!(stats.write_misses, 1);
/// ```
pub fn parse_stats(output: &str) -> Result<AccessStats, StatsError> {
    let mut stats = AccessStats::default();
    for (counter, pattern) in COUNTER_PATTERNS.iter() {
        let label = counter.label();
        let digits = pattern
            .captures(output)
            .and_then(|caps| caps.get(1))
            .ok_or(StatsError::MissingCounter(label))?
            .as_str();
        let value = digits.parse::<u64>().map_err(|_| StatsError::InvalidCounter {
            label,
            value: digits.to_string(),
        })?;
        stats.set(*counter, value);
    }
    Ok(stats)
}
