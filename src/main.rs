use clap::Parser;
use tracing_subscriber::EnvFilter;

use trendcast::cli::{Cli, Commands};
use trendcast::config::Config;
use trendcast::domain::{Digest, SeenSet};
use trendcast::errors::TrendResult;
use trendcast::services::{FetchService, NotificationService};
use trendcast::sources::SourceRegistry;
use trendcast::storage::{JsonSeenStore, SeenRepository};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> TrendResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the seen-id store
    let store = JsonSeenStore::new(&config.seen_path);

    match cli.command.unwrap_or(Commands::Run {
        dry_run: false,
        skip_notify: false,
    }) {
        Commands::Run {
            dry_run,
            skip_notify,
        } => cmd_run(&config, &store, dry_run, skip_notify),
        Commands::Sources => cmd_sources(&config),
        Commands::Seen { clear } => cmd_seen(&store, clear),
    }
}

fn cmd_run(
    config: &Config,
    store: &impl SeenRepository,
    dry_run: bool,
    skip_notify: bool,
) -> TrendResult<()> {
    let registry = SourceRegistry::from_config(config)?;

    if registry.is_empty() {
        println!("No sources enabled.");
        return Ok(());
    }

    let mut seen = store.load();
    let service = FetchService::new(registry);

    println!("Fetching trends...\n");

    let batch = service.collect(config, &mut seen);

    if batch.is_empty() {
        println!("No new trends to notify.");
        return Ok(());
    }

    let digest = Digest::compose(&batch.videos, &batch.keywords);

    println!(
        "Collected {} items and {} keyword trends.\n",
        batch.videos.len(),
        batch.keywords.len()
    );

    if dry_run {
        println!("[DRY RUN] Digest:\n");
        println!("{}\n", digest.text);
        for attachment in &digest.attachments {
            println!("[DRY RUN] Attachment: {} ({})", attachment.caption, attachment.image_url);
        }
        return Ok(());
    }

    if skip_notify {
        println!(
            "skip-notify mode: remembering {} items without delivery.",
            batch.videos.len()
        );
    } else {
        // Only messaging-client construction may abort the run
        let notifier = NotificationService::new(config)?;

        if config.test_mode {
            println!("Test mode: delivering to the primary chat only.");
        }

        let report = notifier.deliver(&digest);
        println!("Delivered {} messages.", report.sent);

        if !report.is_complete() {
            println!("Partial delivery failure:");
            for failure in &report.failures {
                println!("  ! {}", failure);
            }
        }
    }

    // Best-effort persistence: a failed save never fails the run
    if let Err(e) = store.save(&seen) {
        eprintln!("Failed to persist seen ids: {}", e);
    }

    Ok(())
}

fn cmd_sources(config: &Config) -> TrendResult<()> {
    if config.sources.is_empty() {
        println!("No sources enabled.");
        return Ok(());
    }

    println!("Enabled sources:\n");
    for kind in &config.sources {
        println!("  {}", kind);
    }
    println!();
    println!("Region: {}", config.region);
    println!("Digest limit: {}", config.digest_limit);
    println!("Keyword limit: {}", config.keyword_limit);
    println!(
        "Test mode: {}",
        if config.test_mode { "on" } else { "off" }
    );

    Ok(())
}

fn cmd_seen(store: &impl SeenRepository, clear: bool) -> TrendResult<()> {
    if clear {
        let before = store.load().len();
        store.save(&SeenSet::new())?;
        println!("Cleared {} remembered ids.", before);
        return Ok(());
    }

    let seen = store.load();
    if seen.is_empty() {
        println!("No remembered ids.");
        return Ok(());
    }

    println!("{} remembered ids:\n", seen.len());
    for id in seen.sorted_ids() {
        println!("  {}", id);
    }

    Ok(())
}
