use std::sync::Arc;

use lesson_core::model::StageId;
use storage::ContentRepository;

use super::intent::{IntentOutcome, LessonIntent};
use super::queries::DemoQueries;
use super::service::DemoSession;
use crate::Clock;
use crate::error::DemoError;

/// Orchestrates demo start-up and timestamped learner actions.
#[derive(Clone)]
pub struct DemoLoopService {
    clock: Clock,
    content: Arc<dyn ContentRepository>,
    current_stage: Option<StageId>,
}

impl DemoLoopService {
    #[must_use]
    pub fn new(clock: Clock, content: Arc<dyn ContentRepository>) -> Self {
        Self {
            clock,
            content,
            current_stage: None,
        }
    }

    /// Show `stage_id` as the current stage instead of the content source's choice.
    #[must_use]
    pub fn with_current_stage(mut self, stage_id: Option<StageId>) -> Self {
        self.current_stage = stage_id;
        self
    }

    /// Start a new demo on the first lesson.
    ///
    /// # Errors
    ///
    /// Returns `DemoError` for content failures or an unusable catalog.
    pub async fn start_demo(&self) -> Result<DemoSession, DemoError> {
        let now = self.clock.now();
        DemoQueries::start_from_content(self.content.as_ref(), self.current_stage.as_ref(), now)
            .await
    }

    /// Apply a learner action stamped with the service clock.
    pub fn apply(&self, demo: &mut DemoSession, intent: LessonIntent) -> IntentOutcome {
        demo.apply(intent, self.clock.now())
    }
}
