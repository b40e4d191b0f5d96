use clap::{Parser, Subcommand};
use tagwatch::{
    cmd::{dry_run, DryRunArgs},
    config::{AppConfig, TagLoader},
    notification, persistence, providers,
    supervisor::Supervisor,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the polling supervisor.
    Run,
    /// Replays a recorded readings file through the alert engine without
    /// sending notifications.
    DryRun(DryRunArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_supervisor().await?,
        Commands::DryRun(args) => dry_run::execute(args).await?,
    }

    Ok(())
}

async fn run_supervisor() -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(None)?;
    tracing::debug!(log_dir = %config.log_dir.display(), "Configuration loaded.");

    let tag_settings = TagLoader::new(config.tags_config_path.clone()).load()?;
    tracing::info!(
        tags = tag_settings.tags.len(),
        rules = tag_settings.rules.len(),
        critical = tag_settings.critical_tags().len(),
        "Tag configuration loaded."
    );

    let notifier = notification::build_notifier(&config.channel);
    let reader = providers::build_reader(&config.controller)?;
    let sink = Box::new(persistence::CsvLogSink::new(config.log_dir.clone()));

    let supervisor = Supervisor::builder()
        .config(config)
        .tag_settings(tag_settings)
        .reader(reader)
        .sink(sink)
        .notifier(notifier)
        .build()?;

    tracing::info!("Supervisor initialized, starting polling...");
    supervisor.run().await?;

    Ok(())
}
