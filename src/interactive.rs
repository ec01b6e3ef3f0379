use crate::config::Config;
use crate::display::{follow_status, print_state};
use crate::orchestrator::{Orchestrator, RunRequest};
use console::style;
use dialoguer::{Confirm, Input, Select};

const LANGUAGES: &[&str] = &[
    "Spanish",
    "French",
    "German",
    "Japanese",
    "Chinese",
    "Korean",
    "Portuguese",
    "Italian",
    "Russian",
    "Arabic",
    "Hindi",
    "Dutch",
    "Polish",
    "Turkish",
    "English",
];

/// Prompt for runs until the user quits. All runs share one orchestrator.
pub async fn run_session(orchestrator: &Orchestrator, config: &Config) -> anyhow::Result<()> {
    print_header();
    println!("  Service: {}\n", style(&config.service_url).cyan());

    let mut language = config.default_language.clone();
    let mut use_mock = config.use_mock;

    loop {
        let url: String = Input::new()
            .with_prompt("YouTube URL (e.g. https://www.youtube.com/watch?v=...)")
            .interact_text()?;

        language = select_language(&language)?;

        use_mock = Confirm::new()
            .with_prompt("Use mock translation (no translation cost)?")
            .default(use_mock)
            .interact()?;

        println!();
        let handle = orchestrator.start(RunRequest::new(url, language.clone(), use_mock));
        let status = follow_status(orchestrator.subscribe());
        handle.await?;
        status.await?;

        print_state(&orchestrator.snapshot().state);

        if !Confirm::new()
            .with_prompt("Process another video?")
            .default(true)
            .interact()?
        {
            break;
        }
        println!();
    }

    offer_save(config, &language, use_mock)?;
    Ok(())
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║       ytranslate - YouTube Transcript Translator  ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

fn select_language(current: &str) -> anyhow::Result<String> {
    let mut options: Vec<String> = LANGUAGES.iter().map(|l| l.to_string()).collect();
    options.push("Other...".to_string());

    let default = language_index(current).unwrap_or(options.len() - 1);

    let selection = Select::new()
        .with_prompt("Target language")
        .items(&options)
        .default(default)
        .interact()?;

    if selection < LANGUAGES.len() {
        return Ok(LANGUAGES[selection].to_string());
    }

    let language: String = Input::new()
        .with_prompt("Enter target language (e.g. Vietnamese)")
        .with_initial_text(current)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Language must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(language.trim().to_string())
}

fn language_index(language: &str) -> Option<usize> {
    LANGUAGES
        .iter()
        .position(|l| l.eq_ignore_ascii_case(language.trim()))
}

/// Persist the last language/mock choice when it differs from the config.
fn offer_save(config: &Config, language: &str, use_mock: bool) -> anyhow::Result<()> {
    if config.default_language == language && config.use_mock == use_mock {
        return Ok(());
    }

    if Confirm::new()
        .with_prompt(format!("Save '{}' (mock: {}) as defaults?", language, use_mock))
        .default(false)
        .interact()?
    {
        let mut updated = config.clone();
        updated.default_language = language.to_string();
        updated.use_mock = use_mock;
        let path = updated.save()?;
        println!("{} Saved to {}", style("✓").green(), path.display());
    }
    Ok(())
}
