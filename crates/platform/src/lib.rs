//! Battery counter acquisition and health metrics for cellstat.
//!
//! This crate provides the raw counter model, the health/life percentage
//! calculator, and two acquisition sources that feed it:
//!
//! - [`IoregSource`] - shells out to the `ioreg` inventory command and
//!   scans its text output for known counter keys
//! - [`NativeSource`] - reads the platform power-management interface
//!   through `starship-battery`
//!
//! # Example
//!
//! ```ignore
//! use cellstat_platform::{compute, CounterSource, NativeSource};
//!
//! let mut source = NativeSource::new()?;
//! let counters = source.fetch()?;
//! let metrics = compute(&counters);
//! if let Some(health) = metrics.health_percent {
//!     println!("Health: {health:.2}%");
//! }
//! ```

mod counters;
mod ioreg;
mod metrics;
mod native;
mod source;

pub use counters::{Counter, RawBatteryCounters};
pub use ioreg::IoregSource;
pub use metrics::{compute, BatteryMetrics};
pub use native::NativeSource;
pub use source::{AcquisitionError, CounterSource};
