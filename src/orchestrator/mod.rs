//! Drives one run: video id → transcript → translation.
//!
//! The orchestrator is the only writer of the [`Snapshot`]. Each run is tagged
//! with a [`RunId`]; every state write compares the run against the one in
//! the snapshot and is dropped when they differ, so a slow response from a
//! superseded run can never overwrite a newer run's state.

pub mod state;

pub use state::{OrchestrationState, RunId, Snapshot, Stage};

use crate::error::OperationError;
use crate::transcript::{Transcript, TranscriptSource};
use crate::translate::{TranslationRequest, Translator};
use crate::video_id::extract_video_id;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Buffered transitions per `transitions()` subscriber.
const TRANSITION_BUFFER: usize = 32;

/// Input of one run, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub raw_url: String,
    pub target_language: String,
    pub use_mock: bool,
}

impl RunRequest {
    pub fn new(raw_url: impl Into<String>, target_language: impl Into<String>, use_mock: bool) -> Self {
        Self {
            raw_url: raw_url.into(),
            target_language: target_language.into(),
            use_mock,
        }
    }
}

/// State machine sequencing the transcript and translation calls.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct Orchestrator {
    transcripts: Arc<dyn TranscriptSource>,
    translator: Arc<dyn Translator>,
    state: Arc<watch::Sender<Snapshot>>,
    transitions: broadcast::Sender<Snapshot>,
}

impl Orchestrator {
    pub fn new(transcripts: Arc<dyn TranscriptSource>, translator: Arc<dyn Translator>) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            transcripts,
            translator,
            state: Arc::new(state),
            transitions,
        }
    }

    /// Latest snapshot. Intermediate states may be skipped by slow readers.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// Every accepted transition, in order.
    pub fn transitions(&self) -> broadcast::Receiver<Snapshot> {
        self.transitions.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Supersede whatever run is current and enter `ExtractingId` for a new one.
    pub fn begin(&self, request: &RunRequest) -> RunId {
        let mut run = RunId::NONE;
        self.state.send_modify(|snapshot| {
            if snapshot.state.is_in_flight() {
                info!("Run {} superseded", snapshot.run);
            }
            run = snapshot.run.next();
            snapshot.run = run;
            snapshot.state = OrchestrationState::ExtractingId {
                raw_url: request.raw_url.clone(),
            };
            let _ = self.transitions.send(snapshot.clone());
        });
        info!("Run {} started for {}", run, request.raw_url);
        run
    }

    /// Run to completion. Run failures end up in the snapshot, never as `Err`.
    pub async fn run(&self, request: RunRequest) -> RunId {
        let run = self.begin(&request);
        self.drive(run, &request).await;
        run
    }

    /// Start a run on the tokio runtime. The previous run is superseded before
    /// this returns.
    pub fn start(&self, request: RunRequest) -> JoinHandle<RunId> {
        let run = self.begin(&request);
        let this = self.clone();
        tokio::spawn(async move {
            this.drive(run, &request).await;
            run
        })
    }

    /// Sequence the stages of a run previously opened with [`begin`](Self::begin).
    async fn drive(&self, run: RunId, request: &RunRequest) {
        let Some(id) = extract_video_id(&request.raw_url) else {
            self.fail(run, Stage::ExtractingId, OperationError::invalid_url(), None);
            return;
        };

        if !self.publish(run, OrchestrationState::FetchingTranscript { id: id.clone() }) {
            return;
        }

        debug!("Run {} fetching transcript for {} via {}", run, id, self.transcripts.name());
        let transcript = match self.transcripts.fetch_transcript(&id).await {
            Ok(transcript) => transcript,
            Err(error) => {
                self.fail(run, Stage::FetchingTranscript, error, None);
                return;
            }
        };

        if transcript.is_blank() {
            self.fail(
                run,
                Stage::FetchingTranscript,
                OperationError::empty_transcript(),
                Some(transcript),
            );
            return;
        }

        let translating = OrchestrationState::Translating {
            transcript: transcript.clone(),
            target_language: request.target_language.clone(),
        };
        if !self.publish(run, translating) {
            return;
        }

        let translation_request = TranslationRequest::new(
            transcript.full_text.clone(),
            request.target_language.clone(),
            request.use_mock,
        );

        debug!(
            "Run {} translating {} chars to {} via {}",
            run,
            translation_request.text.len(),
            translation_request.target_language,
            self.translator.name()
        );
        match self.translator.translate(&translation_request).await {
            Ok(translation) => {
                let done = OrchestrationState::Done {
                    transcript,
                    target_language: request.target_language.clone(),
                    translation,
                };
                if self.publish(run, done) {
                    info!("Run {} done", run);
                }
            }
            Err(error) => self.fail(run, Stage::Translating, error, Some(transcript)),
        }
    }

    fn fail(&self, run: RunId, stage: Stage, error: OperationError, transcript: Option<Transcript>) {
        let message = error.message.clone();
        let failed = OrchestrationState::Failed {
            error,
            stage,
            transcript,
        };
        if self.publish(run, failed) {
            warn!("Run {} failed while {}: {}", run, stage, message);
        }
    }

    /// Apply `next` if `run` is still current. Returns false for a stale run.
    fn publish(&self, run: RunId, next: OrchestrationState) -> bool {
        let applied = self.state.send_if_modified(|snapshot| {
            if snapshot.run != run {
                return false;
            }
            snapshot.state = next;
            let _ = self.transitions.send(snapshot.clone());
            true
        });

        if !applied {
            debug!("Discarding stale result from run {}", run);
        }
        applied
    }
}
