use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use ytranslate::config::Config;
use ytranslate::display::{follow_status, print_state};
use ytranslate::gateway::clients_from_config;
use ytranslate::interactive::run_session;
use ytranslate::orchestrator::{Orchestrator, RunRequest};

#[derive(Parser)]
#[command(name = "ytranslate")]
#[command(version, about = "Fetch a YouTube transcript and translate it")]
#[command(long_about = "Fetch a YouTube video's transcript from the transcript service and translate it with the translation service. Run without a URL for an interactive session.")]
struct Cli {
    /// YouTube video URL (youtube.com/watch?v=... or youtu.be/...)
    url: Option<String>,

    /// Target language (e.g. Spanish, French)
    #[arg(short, long, value_parser = non_empty)]
    language: Option<String>,

    /// Use the service's mock translator
    #[arg(long)]
    mock: bool,

    /// Base URL of the transcript/translation service
    #[arg(long)]
    service_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Start an interactive session
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn non_empty(value: &str) -> std::result::Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref url) = cli.service_url {
        config.service_url = url.clone();
    }
    if let Some(ref language) = cli.language {
        config.default_language = language.clone();
    }
    if cli.mock {
        config.use_mock = true;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load config, then let CLI flags win
    let mut config = Config::load().context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);
    config
        .validate()
        .context("Configuration validation failed")?;

    info!("Service:  {}", config.service_url);
    info!("Language: {}", config.default_language);

    // Build HTTP clients
    let (transcripts, translator) =
        clients_from_config(&config).context("Failed to create HTTP client")?;
    let orchestrator = Orchestrator::new(Arc::new(transcripts), Arc::new(translator));

    // No URL (or -i) means interactive mode
    let url = match cli.url {
        Some(ref url) if !cli.interactive => url.clone(),
        _ => return run_session(&orchestrator, &config).await,
    };

    let request = RunRequest::new(url, config.default_language.clone(), config.use_mock);

    // Single run
    let state = if cli.json {
        orchestrator.run(request).await;
        let snapshot = orchestrator.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        snapshot.state
    } else {
        let handle = orchestrator.start(request);
        let status = follow_status(orchestrator.subscribe());
        handle.await?;
        status.await?;
        let state = orchestrator.snapshot().state;
        print_state(&state);
        state
    };

    // Exit non-zero on a failed run
    if let Some(error) = state.error() {
        anyhow::bail!("{}", error);
    }

    Ok(())
}
