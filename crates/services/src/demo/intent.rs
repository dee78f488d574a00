use chrono::{DateTime, Utc};
use lesson_core::model::{AnswerId, QuestionId, StageId};
use lesson_core::{LessonFraction, SessionError, Verdict};

/// A discrete learner action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonIntent {
    Select(AnswerId),
    Reveal,
    ToggleHint,
    /// Skip before resolution, or continue / try again after it.
    Advance,
}

/// A completed lesson counted toward its stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCredit {
    pub question_id: QuestionId,
    pub stage_id: StageId,
    pub stage_progress: LessonFraction,
    pub completed_at: DateTime<Utc>,
}

/// What an intent did to the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Selected(AnswerId),
    HintToggled { visible: bool },
    Revealed {
        verdict: Verdict,
        /// `None` for wrong answers and for questions already counted earlier in the demo.
        credit: Option<CompletionCredit>,
    },
    Advanced { from: QuestionId, skipped: bool },
    /// The action was rejected and nothing changed.
    Ignored(SessionError),
}

impl IntentOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, IntentOutcome::Ignored(_))
    }
}
