//! Derived battery health and charge metrics.

use serde::Serialize;

use crate::counters::{Counter, RawBatteryCounters};

/// Percentages derived from raw capacity counters.
///
/// A field is `None` whenever its divisor was zero or the required counter
/// was absent. That is a normal state (desktop hardware, virtual machine),
/// not an error; consumers must check presence before display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatteryMetrics {
    /// Current max capacity relative to design capacity (0-100+).
    /// May exceed 100 on an over-provisioned or refurbished cell.
    pub health_percent: Option<f64>,

    /// Current charge relative to current max capacity (0-100).
    pub life_percent: Option<f64>,
}

/// Derives health and life percentages from raw counters.
///
/// Pure and O(1): same input always yields the same output, no side
/// effects, and missing counters resolve to 0 before the guards run so a
/// zero divisor can never reach the division.
pub fn compute(counters: &RawBatteryCounters) -> BatteryMetrics {
    let current = counters.resolve(Counter::CurrentCapacity);
    let max = counters.resolve(Counter::MaxCapacity);
    let design = counters.resolve(Counter::DesignCapacity);

    let health_percent =
        (design > 0 && max > 0).then(|| 100.0 * max as f64 / design as f64);
    let life_percent = (max > 0).then(|| 100.0 * current as f64 / max as f64);

    BatteryMetrics {
        health_percent,
        life_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(pairs: &[(Counter, u64)]) -> RawBatteryCounters {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_healthy_battery() {
        let metrics = compute(&counters(&[
            (Counter::DesignCapacity, 4000),
            (Counter::MaxCapacity, 3600),
            (Counter::CurrentCapacity, 2700),
            (Counter::CycleCount, 210),
        ]));

        assert_eq!(metrics.health_percent, Some(90.0));
        assert_eq!(metrics.life_percent, Some(75.0));
    }

    #[test]
    fn test_zero_design_capacity_omits_health() {
        let metrics = compute(&counters(&[
            (Counter::DesignCapacity, 0),
            (Counter::MaxCapacity, 3600),
            (Counter::CurrentCapacity, 1800),
        ]));

        assert_eq!(metrics.health_percent, None);
        assert_eq!(metrics.life_percent, Some(50.0));
    }

    #[test]
    fn test_absent_design_capacity_omits_health() {
        let metrics = compute(&counters(&[
            (Counter::MaxCapacity, 3600),
            (Counter::CurrentCapacity, 1800),
        ]));

        assert_eq!(metrics.health_percent, None);
        assert_eq!(metrics.life_percent, Some(50.0));
    }

    #[test]
    fn test_zero_max_capacity_omits_both() {
        let metrics = compute(&counters(&[
            (Counter::DesignCapacity, 4000),
            (Counter::MaxCapacity, 0),
            (Counter::CurrentCapacity, 1800),
        ]));

        assert_eq!(metrics.health_percent, None);
        assert_eq!(metrics.life_percent, None);
    }

    #[test]
    fn test_empty_counters_omit_both() {
        let metrics = compute(&RawBatteryCounters::new());

        assert_eq!(metrics.health_percent, None);
        assert_eq!(metrics.life_percent, None);
    }

    #[test]
    fn test_over_provisioned_cell_exceeds_100() {
        let metrics = compute(&counters(&[
            (Counter::DesignCapacity, 4000),
            (Counter::MaxCapacity, 4200),
            (Counter::CurrentCapacity, 4200),
        ]));

        let health = metrics.health_percent.unwrap();
        assert!(health > 100.0);
        assert!((health - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = counters(&[
            (Counter::DesignCapacity, 5120),
            (Counter::MaxCapacity, 4873),
            (Counter::CurrentCapacity, 1204),
        ]);

        assert_eq!(compute(&input), compute(&input));
    }
}
