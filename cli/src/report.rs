//! Renders the battery report from raw counters and derived metrics.

use cellstat_platform::{BatteryMetrics, Counter, RawBatteryCounters};
use serde_json::json;

/// Health below this percentage gets a servicing advisory in the report.
const LOW_HEALTH_THRESHOLD: f64 = 80.0;

const NO_DATA_MESSAGE: &str =
    "Could not retrieve valid battery data. Make sure you are on a system with a battery.";

/// Builds the human-readable report.
///
/// Derived metrics are printed only when present; a zero or missing
/// divisor upstream means the corresponding line is omitted, not shown as
/// zero.
pub fn render(counters: &RawBatteryCounters, metrics: &BatteryMetrics, unit: &str) -> String {
    if counters.is_empty() {
        return render_unavailable();
    }

    let mut out = String::new();
    out.push_str("cellstat battery report\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');

    out.push_str("\n--- Battery Statistics ---\n");
    for counter in Counter::ALL.iter().filter(|c| c.is_capacity()) {
        if let Some(value) = counters.get(*counter) {
            out.push_str(&format!("{}: {} {}\n", counter.label(), value, unit));
        }
    }

    if let Some(cycles) = counters.cycle_count() {
        out.push_str("\n--- Usage Statistics ---\n");
        out.push_str(&format!("Current Cycle Count: {}\n", cycles));
        if let Some(rated) = counters.get(Counter::TotalCycleCount) {
            out.push_str(&format!("Rated Cycle Count: {}\n", rated));
        }
    }

    match (metrics.health_percent, metrics.life_percent) {
        (None, None) => {
            out.push('\n');
            out.push_str("No percentages could be derived from the reported counters.\n");
            return out;
        }
        (health, life) => {
            out.push('\n');
            if let Some(health) = health {
                out.push_str(&format!("Battery Health: {:.2}%\n", health));
            }
            if let Some(life) = life {
                out.push_str(&format!("Battery Life: {:.2}%\n", life));
            }
        }
    }

    out.push_str("\n--- Interpretation ---\n");
    out.push_str(
        "Battery Health is the long-term condition of the battery: its maximum\n\
         charge capacity relative to the original design capacity. A lower value\n\
         means the battery cannot hold as much charge as when it was new.\n",
    );
    out.push_str(
        "Battery Life is the current charge level, like a fuel gauge: how much\n\
         power is available right now.\n",
    );

    if metrics
        .health_percent
        .is_some_and(|health| health < LOW_HEALTH_THRESHOLD)
    {
        out.push_str("\n--- Advisory ---\n");
        out.push_str(&format!(
            "Battery health is below {:.0}%. Consider having the battery serviced\n\
             or replaced; runtime on a full charge will be noticeably reduced.\n",
            LOW_HEALTH_THRESHOLD
        ));
    }

    out
}

/// The soft-failure rendering: acquisition produced no usable data.
pub fn render_unavailable() -> String {
    format!("{}\n", NO_DATA_MESSAGE)
}

/// Machine-readable report for `--json`.
pub fn render_json(
    source: &str,
    unit: &str,
    counters: &RawBatteryCounters,
    metrics: &BatteryMetrics,
) -> String {
    let doc = json!({
        "available": !counters.is_empty(),
        "source": source,
        "unit": unit,
        "counters": counters,
        "metrics": metrics,
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

/// Machine-readable soft-failure document for `--json`.
pub fn render_unavailable_json() -> String {
    let doc = json!({
        "available": false,
        "source": null,
        "unit": null,
        "counters": null,
        "metrics": null,
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellstat_platform::compute;

    fn counters(pairs: &[(Counter, u64)]) -> RawBatteryCounters {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_full_report() {
        let counters = counters(&[
            (Counter::DesignCapacity, 4000),
            (Counter::MaxCapacity, 3600),
            (Counter::CurrentCapacity, 2700),
            (Counter::CycleCount, 210),
        ]);
        let metrics = compute(&counters);
        let report = render(&counters, &metrics, "mAh");

        assert!(report.contains("Original Design Capacity: 4000 mAh"));
        assert!(report.contains("Current Max Capacity: 3600 mAh"));
        assert!(report.contains("Current Charge: 2700 mAh"));
        assert!(report.contains("Current Cycle Count: 210"));
        assert!(report.contains("Battery Health: 90.00%"));
        assert!(report.contains("Battery Life: 75.00%"));
        assert!(report.contains("--- Interpretation ---"));
        assert!(!report.contains("--- Advisory ---"));
    }

    #[test]
    fn test_advisory_below_threshold() {
        let counters = counters(&[
            (Counter::DesignCapacity, 4000),
            (Counter::MaxCapacity, 3000),
            (Counter::CurrentCapacity, 1500),
        ]);
        let metrics = compute(&counters);
        let report = render(&counters, &metrics, "mAh");

        assert!(report.contains("Battery Health: 75.00%"));
        assert!(report.contains("--- Advisory ---"));
    }

    #[test]
    fn test_absent_health_is_omitted_not_zero() {
        let counters = counters(&[
            (Counter::MaxCapacity, 3600),
            (Counter::CurrentCapacity, 1800),
        ]);
        let metrics = compute(&counters);
        let report = render(&counters, &metrics, "mAh");

        assert!(!report.contains("Battery Health"));
        assert!(report.contains("Battery Life: 50.00%"));
    }

    #[test]
    fn test_counters_without_derivable_metrics() {
        let counters = counters(&[(Counter::DesignCapacity, 4000)]);
        let metrics = compute(&counters);
        let report = render(&counters, &metrics, "mAh");

        assert!(report.contains("Original Design Capacity: 4000 mAh"));
        assert!(report.contains("No percentages could be derived"));
        assert!(!report.contains("--- Interpretation ---"));
    }

    #[test]
    fn test_empty_counters_render_unavailable() {
        let empty = RawBatteryCounters::new();
        let metrics = compute(&empty);
        assert_eq!(render(&empty, &metrics, "mAh"), render_unavailable());
    }

    #[test]
    fn test_json_report_includes_null_for_absent_metrics() {
        let counters = counters(&[
            (Counter::MaxCapacity, 3600),
            (Counter::CurrentCapacity, 1800),
        ]);
        let metrics = compute(&counters);
        let doc: serde_json::Value =
            serde_json::from_str(&render_json("ioreg", "mAh", &counters, &metrics)).unwrap();

        assert_eq!(doc["available"], true);
        assert_eq!(doc["source"], "ioreg");
        assert_eq!(doc["metrics"]["health_percent"], serde_json::Value::Null);
        assert_eq!(doc["metrics"]["life_percent"], 50.0);
        assert_eq!(doc["counters"]["MaxCapacity"], 3600);
    }

    #[test]
    fn test_json_unavailable_document() {
        let doc: serde_json::Value =
            serde_json::from_str(&render_unavailable_json()).unwrap();
        assert_eq!(doc["available"], false);
        assert_eq!(doc["metrics"], serde_json::Value::Null);
    }
}
