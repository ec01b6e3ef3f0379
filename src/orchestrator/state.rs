//! Run states as seen by the presentation layer.

use crate::error::OperationError;
use crate::transcript::Transcript;
use crate::translate::TranslationResult;
use crate::video_id::VideoId;
use serde::Serialize;

/// Identity of one run. Strictly increasing per orchestrator; `RunId::NONE`
/// tags the initial idle snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RunId(u64);

impl RunId {
    pub const NONE: RunId = RunId(0);

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> RunId {
        RunId(self.0 + 1)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-terminal stages a run passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    ExtractingId,
    FetchingTranscript,
    Translating,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::ExtractingId => write!(f, "extracting id"),
            Stage::FetchingTranscript => write!(f, "fetching transcript"),
            Stage::Translating => write!(f, "translating"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all_fields = "camelCase")]
pub enum OrchestrationState {
    Idle,
    ExtractingId {
        raw_url: String,
    },
    FetchingTranscript {
        id: VideoId,
    },
    Translating {
        transcript: Transcript,
        target_language: String,
    },
    Done {
        transcript: Transcript,
        target_language: String,
        translation: TranslationResult,
    },
    Failed {
        error: OperationError,
        stage: Stage,
        /// Transcript fetched earlier in the same run, kept visible.
        transcript: Option<Transcript>,
    },
}

impl OrchestrationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// True while a run is between `start` and a terminal state.
    pub fn is_in_flight(&self) -> bool {
        !matches!(self, Self::Idle) && !self.is_terminal()
    }

    /// The stage the run is in, or failed at.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::ExtractingId { .. } => Some(Stage::ExtractingId),
            Self::FetchingTranscript { .. } => Some(Stage::FetchingTranscript),
            Self::Translating { .. } => Some(Stage::Translating),
            Self::Failed { stage, .. } => Some(*stage),
            Self::Idle | Self::Done { .. } => None,
        }
    }

    pub fn status_line(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::ExtractingId { .. } => "Extracting video id...".to_string(),
            Self::FetchingTranscript { .. } => "Fetching Transcript...".to_string(),
            Self::Translating {
                target_language, ..
            } => format!("Translating to {}...", target_language),
            Self::Done { .. } => "Done!".to_string(),
            Self::Failed { .. } => "Failed".to_string(),
        }
    }

    pub fn error(&self) -> Option<&OperationError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        match self {
            Self::Translating { transcript, .. } | Self::Done { transcript, .. } => Some(transcript),
            Self::Failed { transcript, .. } => transcript.as_ref(),
            _ => None,
        }
    }

    pub fn translation(&self) -> Option<&TranslationResult> {
        match self {
            Self::Done { translation, .. } => Some(translation),
            _ => None,
        }
    }
}

/// What subscribers observe: the current run and its state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub run: RunId,
    pub state: OrchestrationState,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            run: RunId::NONE,
            state: OrchestrationState::Idle,
        }
    }
}
