pub mod config;
pub mod display;
pub mod error;
pub mod gateway;
pub mod interactive;
pub mod orchestrator;
pub mod transcript;
pub mod translate;
pub mod video_id;

pub use config::Config;
pub use error::{ErrorKind, OperationError, Result, YtranslateError};
pub use orchestrator::{OrchestrationState, Orchestrator, RunId, RunRequest, Snapshot, Stage};
pub use transcript::{Transcript, TranscriptSegment, TranscriptSource};
pub use translate::{TranslationRequest, TranslationResult, Translator};
pub use video_id::{extract_video_id, VideoId};
