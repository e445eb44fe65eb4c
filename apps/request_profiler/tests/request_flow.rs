use std::time::Duration;
use telemetry::report;
use timing::{EntryType, RequestStart, TimingRegistry, REQUEST_START};

#[test]
fn test_request_lifecycle() {
    // 1. Setup: request started 50ms before the registry was created
    let t0 = common::now_seconds() - 0.05;
    let mut registry = TimingRegistry::with_request_start(RequestStart::high_resolution(t0));

    // 2. Record work
    registry.mark("bootstrap");
    std::thread::sleep(Duration::from_millis(10));
    registry.mark("controller");
    std::thread::sleep(Duration::from_millis(10));
    let controller = registry
        .measure("controller", Some("controller"), None)
        .expect("controller mark exists");
    let total = registry.measure("total", None, None).expect("requestStart exists");

    // 3. Validate
    assert_eq!(total.start_time, t0);
    assert!(total.duration >= 0.069, "total was {}", total.duration);
    assert!(controller.duration >= 0.009, "controller was {}", controller.duration);
    assert!(controller.duration < total.duration);

    let entries = registry.entries();
    assert_eq!(entries[0].name, REQUEST_START);
    assert!(entries.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    assert_eq!(registry.entries_by_type(EntryType::Measure).len(), 2);

    // "controller" was overwritten by the measure of the same name.
    assert_eq!(registry.entries_by_type(EntryType::Mark).len(), 2);

    let header = report::server_timing(&entries);
    assert!(header.contains("controller;dur="));
    assert!(header.contains("total;dur="));

    // 4. Reuse for the next logical period
    registry.clear_marks(None);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.request_start(), Some(t0));
}
