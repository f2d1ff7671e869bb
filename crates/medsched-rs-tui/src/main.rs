//! Terminal front desk for the MedSched appointment scheduler.

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use medsched_rs_config::{LayeredConfigOptions, MedschedConfig};
use medsched_rs_core::PatientDirectory;
use medsched_rs_tui::TuiConfig;
use std::fs::File;
use std::path::PathBuf;

/// Command-line options for the scheduler.
#[derive(Parser)]
#[command(name = "medsched", version)]
struct Cli {
    /// Optional path to a medsched.json5 config file applied over discovered layers
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Entry point for the scheduler TUI.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    info!(
        "starting medsched (config_set={}, log_file_set={})",
        cli.config.is_some(),
        cli.log_file.is_some()
    );

    let cwd = std::env::current_dir().context("cwd")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        info!("applying runtime config: {}", path.display());
        options = options.with_runtime_path(path);
    }
    let layered =
        MedschedConfig::load_layered_with_options(options).context("failed to load config")?;
    debug!("config loaded (layers={})", layered.layers.len());

    medsched_rs_tui::run(PatientDirectory::new(), TuiConfig::from(&layered.config))
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let mut builder = env_logger::builder();
    builder.format_timestamp_millis().parse_default_env();
    if let Some(path) = cli.log_file.as_ref() {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
    Ok(())
}
