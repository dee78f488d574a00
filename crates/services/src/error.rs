//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::model::StageId;
use storage::StorageError;

/// Errors emitted while starting a demo.
///
/// Learner actions never fail with this type; rejected actions are reported
/// through `IntentOutcome::Ignored`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DemoError {
    #[error("no lessons available for the demo")]
    EmptyCatalog,
    #[error("current stage {0} is not in the stage list")]
    UnknownStage(StageId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
