use anyhow::Context;
use common::RequestStart;
use serde::Deserialize;
use std::fs;
use telemetry::ReportFormat;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    /// Explicit request start. Absent means the host environment decides.
    pub request: Option<RequestStart>,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub file_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
}

/// One simulated unit of work in the profiled request.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StageConfig {
    pub name: String,
    pub work_ms: u64,
}

fn default_log_file() -> String {
    "request_profiler.log".to_string()
}

impl AppConfig {
    pub fn request_start(&self) -> RequestStart {
        self.request.unwrap_or_else(RequestStart::from_env)
    }
}

pub fn load(path: &str) -> Result<AppConfig, anyhow::Error> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;

    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig, anyhow::Error> {
    let config: AppConfig =
        toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

    Ok(config)
}
