//! The acquisition contract shared by both counter sources.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

use crate::counters::RawBatteryCounters;

/// Why a counter snapshot could not be acquired.
///
/// Every variant is a soft failure: callers report "no data" and exit
/// cleanly rather than treating these as faults.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// No battery hardware or power source is present on this system.
    #[error("no battery data available on this system")]
    Unavailable,

    /// The inventory command could not be spawned.
    #[error("failed to run {command}: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: io::Error,
    },

    /// The inventory command ran but exited with a non-zero status.
    #[error("{command} exited with {status}")]
    CommandStatus {
        command: &'static str,
        status: ExitStatus,
    },

    /// The native power-management interface reported an error.
    #[error("power-management interface error: {0}")]
    Backend(#[from] starship_battery::Error),
}

/// A source of raw battery counters.
///
/// Both acquisition variants expose the same output shape; which one is
/// used is a startup decision in the caller, not a concern of the
/// calculator.
pub trait CounterSource {
    /// Short name for log messages.
    fn name(&self) -> &'static str;

    /// Unit label for the capacity counters this source reports.
    fn unit(&self) -> &'static str;

    /// Fetch a fresh counter snapshot from the platform.
    ///
    /// An `Ok` result with an empty mapping is valid: it means the backend
    /// responded but reported none of the recognized counters.
    fn fetch(&mut self) -> Result<RawBatteryCounters, AcquisitionError>;
}
