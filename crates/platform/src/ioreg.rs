//! Text-inventory acquisition: scan `ioreg` output for counter keys.

use std::process::Command;

use tracing::debug;

use crate::counters::{Counter, RawBatteryCounters};
use crate::source::{AcquisitionError, CounterSource};

const IOREG: &str = "ioreg";
const IOREG_ARGS: [&str; 2] = ["-l", "-w0"];

/// Counter source backed by the `ioreg` registry dump.
///
/// The dump is free-form text; recognized counters appear on lines of the
/// form `"Key" = <integer>`. The key set is closed and stable, so a fixed
/// line scanner is enough - no general parser. Lines that do not match are
/// skipped, which makes missing hardware indistinguishable from a battery
/// that simply does not report a field. That is intentional: both surface
/// as absent counters.
#[derive(Debug, Default)]
pub struct IoregSource;

impl IoregSource {
    pub fn new() -> Self {
        Self
    }
}

impl CounterSource for IoregSource {
    fn name(&self) -> &'static str {
        "ioreg"
    }

    fn unit(&self) -> &'static str {
        "mAh"
    }

    fn fetch(&mut self) -> Result<RawBatteryCounters, AcquisitionError> {
        let output = Command::new(IOREG)
            .args(IOREG_ARGS)
            .output()
            .map_err(|source| AcquisitionError::Command {
                command: IOREG,
                source,
            })?;

        if !output.status.success() {
            return Err(AcquisitionError::CommandStatus {
                command: IOREG,
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let counters = scan_counters(&stdout);
        debug!(
            empty = counters.is_empty(),
            "scanned ioreg output for battery counters"
        );
        Ok(counters)
    }
}

/// Scans an `ioreg` dump for the recognized counter lines.
///
/// When a service reports `TotalCycleCount` but no `CycleCount`, the rated
/// value is carried over as the elapsed count, matching what the registry
/// keys mean on hardware that only exposes the lifetime field.
fn scan_counters(output: &str) -> RawBatteryCounters {
    let mut counters = RawBatteryCounters::new();

    for line in output.lines() {
        if let Some((counter, value)) = scan_line(line) {
            counters.insert(counter, value);
        }
    }

    if counters.get(Counter::CycleCount).is_none() {
        if let Some(rated) = counters.get(Counter::TotalCycleCount) {
            counters.insert(Counter::CycleCount, rated);
        }
    }

    counters
}

/// Extracts a `"Key" = <integer>` pair from one registry line.
///
/// The key comparison is exact: registry dumps also contain keys like
/// `DesignCycleCount9C` that must not be captured by substring matching.
/// A recognized key whose value is not a plain non-negative integer is
/// treated as absent, never as a failure.
fn scan_line(line: &str) -> Option<(Counter, u64)> {
    // ioreg tree lines are prefixed with pipe-drawing characters.
    let line = line.trim_start_matches(|c: char| c.is_whitespace() || c == '|');

    let rest = line.strip_prefix('"')?;
    let (key, rest) = rest.split_once('"')?;
    let counter = counter_for_key(key)?;

    let value = rest.trim_start().strip_prefix('=')?.trim();
    let value = value.parse::<u64>().ok()?;
    Some((counter, value))
}

fn counter_for_key(key: &str) -> Option<Counter> {
    match key {
        "AppleRawCurrentCapacity" => Some(Counter::CurrentCapacity),
        "AppleRawMaxCapacity" => Some(Counter::MaxCapacity),
        "DesignCapacity" => Some(Counter::DesignCapacity),
        "CycleCount" => Some(Counter::CycleCount),
        "TotalCycleCount" => Some(Counter::TotalCycleCount),
        _ => None,
    }
}
