use crate::config::StageConfig;
use telemetry::{report, ReportFormat};
use timing::{Clock, TimingRegistry};

pub const TOTAL: &str = "total";

/// Drives one request through the registry.
///
/// Every stage gets a `<name>:start` mark and a measure named after the stage
/// running from that mark to when `work` returns. A final `total` measure
/// spans the whole request from `requestStart`.
pub fn run_request<C, F>(
    registry: &mut TimingRegistry<C>,
    stages: &[StageConfig],
    mut work: F,
) -> anyhow::Result<()>
where
    C: Clock,
    F: FnMut(&StageConfig),
{
    for stage in stages {
        let start_mark = format!("{}:start", stage.name);
        registry.mark(start_mark.as_str());
        work(stage);
        registry.measure(stage.name.as_str(), Some(start_mark.as_str()), None)?;
    }

    let total = registry.measure(TOTAL, None, None)?;
    tracing::info!(duration_ms = total.duration * 1000.0, stages = stages.len(), "request finished");
    Ok(())
}

/// Renders the registry in the configured format. `Log` writes straight to the subscriber.
pub fn render<C: Clock>(
    registry: &TimingRegistry<C>,
    format: ReportFormat,
) -> anyhow::Result<Option<String>> {
    let entries = registry.entries();
    match format {
        ReportFormat::Log => {
            report::log_entries(&entries);
            Ok(None)
        }
        ReportFormat::Json => Ok(Some(report::to_json(&entries)?)),
        ReportFormat::ServerTiming => Ok(Some(report::server_timing(&entries))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timing::{EntryType, ManualClock, RequestStart, REQUEST_START};

    fn stages() -> Vec<StageConfig> {
        vec![
            StageConfig {
                name: "auth".to_string(),
                work_ms: 2,
            },
            StageConfig {
                name: "db".to_string(),
                work_ms: 10,
            },
        ]
    }

    #[test]
    fn test_run_request_records_stages() {
        let clock = ManualClock::new(1.0);
        let mut registry = TimingRegistry::with_clock(clock.clone(), RequestStart::high_resolution(0.5));

        run_request(&mut registry, &stages(), |stage| {
            clock.advance(stage.work_ms as f64 / 1000.0)
        })
        .expect("all marks exist");

        let db = registry.entry_by_name("db").expect("db measure");
        assert_eq!(db.entry_type, EntryType::Measure);
        assert!((db.duration - 0.010).abs() < 1e-9);
        assert_eq!(db.start_time, registry.entry_by_name("db:start").unwrap().start_time);

        let total = registry.entry_by_name(TOTAL).expect("total measure");
        assert_eq!(total.start_time, 0.5);
        assert!((total.duration - 0.512).abs() < 1e-9);

        let marks = registry.entries_by_type(EntryType::Mark);
        let names: Vec<&str> = marks.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![REQUEST_START, "auth:start", "db:start"]);
    }

    #[test]
    fn test_render_server_timing() {
        let clock = ManualClock::new(10.0);
        let mut registry = TimingRegistry::with_clock(clock.clone(), RequestStart::coarse(10));
        run_request(&mut registry, &stages()[..1], |_| clock.advance(0.002)).unwrap();

        let header = render(&registry, ReportFormat::ServerTiming).unwrap();
        assert_eq!(header.as_deref(), Some("auth;dur=2.000, total;dur=2.000"));
        assert_eq!(render(&registry, ReportFormat::Log).unwrap(), None);
    }
}
