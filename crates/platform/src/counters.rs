//! Raw battery counters as reported by the platform.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// A recognized battery counter name.
///
/// The set is closed: acquisition sources map whatever field names their
/// backend uses onto these five counters and drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Counter {
    /// Present charge, in raw capacity units.
    CurrentCapacity,
    /// Maximum chargeable capacity right now.
    MaxCapacity,
    /// Factory-specified maximum capacity when new.
    DesignCapacity,
    /// Charge/discharge cycles elapsed.
    CycleCount,
    /// Lifetime-rated cycle count, when the platform reports one.
    TotalCycleCount,
}

impl Counter {
    /// All counters, in report display order.
    pub const ALL: [Counter; 5] = [
        Counter::DesignCapacity,
        Counter::MaxCapacity,
        Counter::CurrentCapacity,
        Counter::CycleCount,
        Counter::TotalCycleCount,
    ];

    /// Returns a human-readable label for the counter.
    pub fn label(&self) -> &'static str {
        match self {
            Counter::CurrentCapacity => "Current Charge",
            Counter::MaxCapacity => "Current Max Capacity",
            Counter::DesignCapacity => "Original Design Capacity",
            Counter::CycleCount => "Cycle Count",
            Counter::TotalCycleCount => "Rated Cycle Count",
        }
    }

    /// Returns true if the counter is a capacity reading (as opposed to a
    /// cycle tally) and should carry a capacity unit suffix in reports.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Counter::CurrentCapacity | Counter::MaxCapacity | Counter::DesignCapacity
        )
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A snapshot of raw battery counters.
///
/// Any counter may be absent; absence is the normal signal for hardware
/// that does not report the field (or no battery at all). Values are the
/// platform's native capacity units, never percentages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawBatteryCounters {
    counters: HashMap<Counter, u64>,
}

impl RawBatteryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, counter: Counter, value: u64) {
        self.counters.insert(counter, value);
    }

    /// Returns the counter value, or `None` when the platform did not
    /// report it.
    pub fn get(&self, counter: Counter) -> Option<u64> {
        self.counters.get(&counter).copied()
    }

    /// Returns the counter value, defaulting to 0 when absent.
    pub fn resolve(&self, counter: Counter) -> u64 {
        self.get(counter).unwrap_or(0)
    }

    /// True when no counters were reported at all (no battery present, or
    /// the inventory output had no matching fields).
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// The elapsed cycle count, falling back to the lifetime-rated count
    /// when the live counter is missing.
    pub fn cycle_count(&self) -> Option<u64> {
        self.get(Counter::CycleCount)
            .or_else(|| self.get(Counter::TotalCycleCount))
    }
}

impl FromIterator<(Counter, u64)> for RawBatteryCounters {
    fn from_iter<I: IntoIterator<Item = (Counter, u64)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().collect(),
        }
    }
}
