mod config;
mod profile;

use std::thread;
use std::time::Duration;
use timing::TimingRegistry;

fn main() -> anyhow::Result<()> {
    // 1. Load Config
    let config = match config::load("config.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("CRITICAL: {:#}", e);
            eprintln!("Please copy config.example.toml to config.toml and configure it.");
            std::process::exit(1);
        }
    };

    // 2. Initialize Telemetry
    let _guard = telemetry::init(&config.telemetry.log_dir, &config.telemetry.file_name)?;
    tracing::info!("Starting Request Profiler...");

    // 3. Request Start
    // An explicit [request] table wins; otherwise the host environment provides it.
    let start = config.request_start();
    tracing::info!(
        high_resolution = ?start.high_resolution,
        coarse = ?start.coarse,
        "Request start source"
    );
    let mut registry = TimingRegistry::with_request_start(start);

    // 4. Run the simulated request
    profile::run_request(&mut registry, &config.stages, |stage| {
        tracing::debug!(stage = %stage.name, work_ms = stage.work_ms, "running stage");
        thread::sleep(Duration::from_millis(stage.work_ms));
    })?;

    // 5. Report
    if let Some(output) = profile::render(&registry, config.report.format)? {
        println!("{}", output);
    }

    tracing::info!(entries = registry.len(), "Request Profiler finished.");
    Ok(())
}
