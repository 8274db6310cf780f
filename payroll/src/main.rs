use anyhow::Context;
use chrono::Local;
use log::{error, info};
use std::path::PathBuf;

use clinic_payroll::backend::domain::ConfigService;
use clinic_payroll::backend::io::HttpScheduleClient;
use clinic_payroll::{report_sink, run_payroll};

const CONFIG_ENV: &str = "PAYROLL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "payroll.toml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error!("Payroll run failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = ConfigService::load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    let source = HttpScheduleClient::from_config(&config)
        .context("Failed to set up schedule client")?;
    let sink = report_sink(&config).context("Failed to set up report delivery")?;

    let today = Local::now().date_naive();
    let report = run_payroll(&config, &source, sink.as_ref(), today)
        .context("Failed to produce payroll report")?;

    info!("Payroll run complete: {}", report.subject);
    Ok(())
}
