//! Native acquisition through the platform power-management interface.

use starship_battery::units::energy::watt_hour;
use starship_battery::Manager;

use tracing::debug;

use crate::counters::{Counter, RawBatteryCounters};
use crate::source::{AcquisitionError, CounterSource};

/// Counter source backed by `starship-battery`.
///
/// The manager handle is created once per source and owned explicitly, so
/// there is no hidden process-wide initialization to order around. Energy
/// readings come back in watt-hours and are stored as integer
/// milliwatt-hour counters; both sources then feed the calculator the same
/// shape.
pub struct NativeSource {
    manager: Manager,
}

impl NativeSource {
    pub fn new() -> Result<Self, AcquisitionError> {
        let manager = Manager::new()?;
        Ok(Self { manager })
    }
}

impl CounterSource for NativeSource {
    fn name(&self) -> &'static str {
        "native"
    }

    fn unit(&self) -> &'static str {
        "mWh"
    }

    fn fetch(&mut self) -> Result<RawBatteryCounters, AcquisitionError> {
        let battery = self
            .manager
            .batteries()?
            .next()
            .ok_or(AcquisitionError::Unavailable)??;

        let mut counters = RawBatteryCounters::new();
        counters.insert(
            Counter::CurrentCapacity,
            wh_to_raw(battery.energy().get::<watt_hour>()),
        );
        counters.insert(
            Counter::MaxCapacity,
            wh_to_raw(battery.energy_full().get::<watt_hour>()),
        );
        counters.insert(
            Counter::DesignCapacity,
            wh_to_raw(battery.energy_full_design().get::<watt_hour>()),
        );

        // Cycle count is optional on many platforms; the rated-cycle field
        // has no stable name in the registry, so only the live counter is
        // taken here.
        if let Some(cycles) = battery.cycle_count() {
            counters.insert(Counter::CycleCount, u64::from(cycles));
        }

        debug!(vendor = ?battery.vendor(), "read battery counters from power-management interface");
        Ok(counters)
    }
}

/// Converts a watt-hour reading to an integer milliwatt-hour counter.
fn wh_to_raw(wh: f32) -> u64 {
    let mwh = f64::from(wh) * 1000.0;
    if mwh.is_finite() && mwh > 0.0 {
        mwh.round() as u64
    } else {
        0
    }
}
