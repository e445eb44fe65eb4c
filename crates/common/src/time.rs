use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;
use std::time::Instant;

/// Host variable carrying the request start as fractional seconds.
pub const REQUEST_TIME_FLOAT_VAR: &str = "REQUEST_TIME_FLOAT";
/// Host variable carrying the request start as whole seconds.
pub const REQUEST_TIME_VAR: &str = "REQUEST_TIME";

/// Wall-clock anchor paired with a monotonic instant, captured on first use.
/// Timestamps are derived from the anchor so that successive reads never go backwards.
static CLOCK_ANCHOR: Lazy<(Instant, f64)> = Lazy::new(|| (Instant::now(), wall_clock_seconds()));

/// Current wall-clock time in seconds since the Unix epoch, straight from the system clock.
fn wall_clock_seconds() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1_000_000_000.0
}

/// Current time in seconds since the Unix epoch, monotonic within the process.
pub fn now_seconds() -> f64 {
    let (instant, wall) = *CLOCK_ANCHOR;
    wall + instant.elapsed().as_secs_f64()
}

/// Where a registry takes its `requestStart` reference time from.
///
/// The high-resolution value wins when both are present. When neither is
/// present the registry uses its clock's current time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RequestStart {
    pub high_resolution: Option<f64>,
    pub coarse: Option<i64>,
}

impl RequestStart {
    pub fn high_resolution(seconds: f64) -> Self {
        Self {
            high_resolution: Some(seconds),
            coarse: None,
        }
    }

    pub fn coarse(seconds: i64) -> Self {
        Self {
            high_resolution: None,
            coarse: Some(seconds),
        }
    }

    /// Reads the host-provided request start from the process environment.
    pub fn from_env() -> Self {
        let float = env::var(REQUEST_TIME_FLOAT_VAR).ok();
        let coarse = env::var(REQUEST_TIME_VAR).ok();
        Self::from_vars(float.as_deref(), coarse.as_deref())
    }

    /// Parses raw variable values. Unparseable values are dropped.
    pub fn from_vars(float: Option<&str>, coarse: Option<&str>) -> Self {
        let high_resolution = float.and_then(|raw| match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                tracing::warn!(var = REQUEST_TIME_FLOAT_VAR, value = raw, "ignoring invalid request start");
                None
            }
        });
        let coarse = coarse.and_then(|raw| match raw.trim().parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(var = REQUEST_TIME_VAR, value = raw, "ignoring invalid request start");
                None
            }
        });

        Self {
            high_resolution,
            coarse,
        }
    }

    pub fn resolve(&self) -> Option<f64> {
        self.high_resolution.or(self.coarse.map(|s| s as f64))
    }
}
