use chrono::{DateTime, Utc};

use lesson_core::ProgressTracker;
use lesson_core::model::StageId;
use storage::ContentRepository;

use super::service::DemoSession;
use crate::error::DemoError;

/// Content-source backed demo builders.
pub(crate) struct DemoQueries;

impl DemoQueries {
    /// Load lessons and stages and build a demo on the first lesson.
    ///
    /// `current_stage` overrides the content source's designator when set.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::Storage` when the content source fails,
    /// `DemoError::EmptyCatalog` when it has no lessons and
    /// `DemoError::UnknownStage` when the current stage is not listed.
    pub async fn start_from_content(
        content: &dyn ContentRepository,
        current_stage: Option<&StageId>,
        now: DateTime<Utc>,
    ) -> Result<DemoSession, DemoError> {
        let lessons = content.lessons().await?;
        let stages = content.stages().await?;
        let current = match current_stage {
            Some(stage_id) => stage_id.clone(),
            None => content.current_stage().await?,
        };

        let tracker = ProgressTracker::new(stages, current);
        if tracker.current().is_err() {
            return Err(DemoError::UnknownStage(tracker.current_stage_id().clone()));
        }

        tracing::info!(
            lessons = lessons.len(),
            stages = tracker.stages().len(),
            current_stage = %tracker.current_stage_id(),
            "Starting demo"
        );
        DemoSession::new(lessons, tracker, now)
    }
}
