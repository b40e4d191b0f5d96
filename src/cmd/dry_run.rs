//! Replays recorded readings through the alert engine without sending
//! notifications.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::{
    config::{AppConfig, TagLoader},
    engine::alert_manager::AlertEngine,
    notification::StdoutNotifier,
    providers::{
        replay::ReplayController,
        traits::{ControllerError, ControllerReader},
    },
};

/// Arguments for the `dry-run` subcommand.
#[derive(Debug, Args)]
pub struct DryRunArgs {
    /// Path to the recorded readings file (a JSON array of cycles).
    #[arg(long)]
    pub readings: PathBuf,

    /// Directory containing app.yaml and tags.yaml.
    #[arg(long)]
    pub config_dir: Option<String>,
}

/// Executes the dry run: every recorded cycle goes through the engine with
/// the stdout notifier, then a summary is printed.
pub async fn execute(args: DryRunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::new(args.config_dir.as_deref())?;
    let settings = TagLoader::new(config.tags_config_path.clone()).load()?;
    let tag_names = settings.tag_names();

    let mut reader = ReplayController::from_file(&args.readings)?;
    tracing::info!(cycles = reader.len(), "Replaying recorded readings");

    let quiet_period = chrono::Duration::from_std(config.alert_throttle_secs)?;
    let mut engine = AlertEngine::new(
        std::sync::Arc::new(StdoutNotifier),
        settings.critical_tags(),
        settings.rules.clone(),
        config.max_retries,
        quiet_period,
        config.recipients.clone(),
    );

    let mut cycles = 0usize;
    let mut triggered = 0usize;
    let mut dispatched = 0usize;
    let mut suppressed = 0usize;
    loop {
        let readings = match reader.read_tags(&tag_names).await {
            Ok(readings) => readings,
            Err(ControllerError::ReplayExhausted(_)) => break,
            Err(e) => return Err(e.into()),
        };
        let outcome = engine.process_cycle(&readings, Utc::now()).await;
        cycles += 1;
        triggered += outcome.events.len();
        dispatched += outcome.dispatched;
        suppressed += outcome.suppressed;
    }

    println!(
        "Replayed {} cycles: {} alert conditions, {} printed, {} suppressed by throttle",
        cycles, triggered, dispatched, suppressed
    );
    Ok(())
}
