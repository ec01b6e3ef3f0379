//! Terminal rendering of orchestrator snapshots.

use crate::orchestrator::{OrchestrationState, Snapshot};
use crate::transcript::{Transcript, TranscriptSegment};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// `12s: text`, offset rounded down to whole seconds and dimmed.
pub fn format_segment(segment: &TranscriptSegment) -> String {
    format!(
        "{} {}",
        style(format!("{}s:", segment.offset_secs())).dim(),
        segment.text
    )
}

fn push_transcript(out: &mut String, transcript: Option<&Transcript>) {
    match transcript {
        Some(transcript) if !transcript.items.is_empty() => {
            for segment in &transcript.items {
                out.push_str(&format!("  {}\n", format_segment(segment)));
            }
        }
        Some(_) => out.push_str(&format!("  {}\n", style("(transcript has no captions)").dim())),
        None => out.push_str(&format!("  {}\n", style("No transcript yet.").dim())),
    }
}

/// Styled rendering of a state: error, transcript, translation.
pub fn render_state(state: &OrchestrationState) -> String {
    let mut out = String::new();

    if let Some(error) = state.error() {
        out.push_str(&format!("{} {}\n", style("Error:").red().bold(), style(error).red()));
    }

    out.push_str(&format!("\n{}\n", style("Original Transcript").bold()));
    push_transcript(&mut out, state.transcript());

    match state {
        OrchestrationState::Done {
            target_language,
            translation,
            ..
        } => {
            out.push_str(&format!(
                "\n{}\n",
                style(format!("Translated ({})", target_language)).bold()
            ));
            out.push_str(&translation.translated_text);
            out.push('\n');
        }
        _ => {
            out.push_str(&format!("\n{}\n", style("Translated").bold()));
            out.push_str(&format!("  {}\n", style("Translation will appear here.").dim()));
        }
    }

    out
}

/// Print the final state of a run.
pub fn print_state(state: &OrchestrationState) {
    println!("{}", render_state(state));
}

/// Spinner whose message follows the status line until the run settles.
pub fn follow_status(mut receiver: watch::Receiver<Snapshot>) -> JoinHandle<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    tokio::spawn(async move {
        loop {
            let state = receiver.borrow_and_update().state.clone();
            pb.set_message(state.status_line());

            if state.is_terminal() {
                let mark = if state.error().is_none() {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                pb.finish_with_message(format!("{} {}", mark, state.status_line()));
                break;
            }

            if receiver.changed().await.is_err() {
                pb.finish_and_clear();
                break;
            }
        }
    })
}
