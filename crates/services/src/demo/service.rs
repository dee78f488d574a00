use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use lesson_core::model::{Lesson, QuestionId};
use lesson_core::{LessonCompleted, ProgressTracker, QuestionSession};

use super::intent::{CompletionCredit, IntentOutcome, LessonIntent};
use super::position::DemoPosition;
use crate::error::DemoError;

//
// ─── DEMO SESSION ──────────────────────────────────────────────────────────────
//

/// In-memory demo run over a fixed lesson list.
///
/// Owns one active `QuestionSession` at a time and the `ProgressTracker` that
/// correct answers are credited to. Lessons rotate: advancing past the last one
/// starts again at the first.
pub struct DemoSession {
    lessons: Vec<Lesson>,
    current: usize,
    session: QuestionSession,
    progress: ProgressTracker,
    completed: Vec<QuestionId>,
    started_at: DateTime<Utc>,
}

impl DemoSession {
    /// Create a demo positioned on the first lesson.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::EmptyCatalog` if no lessons are provided.
    pub fn new(
        lessons: Vec<Lesson>,
        progress: ProgressTracker,
        started_at: DateTime<Utc>,
    ) -> Result<Self, DemoError> {
        let first = lessons.first().ok_or(DemoError::EmptyCatalog)?;
        let session = QuestionSession::new(Arc::clone(&first.question));

        Ok(Self {
            lessons,
            current: 0,
            session,
            progress,
            completed: Vec::new(),
            started_at,
        })
    }

    #[must_use]
    pub fn session(&self) -> &QuestionSession {
        &self.session
    }

    #[must_use]
    pub fn current_lesson(&self) -> &Lesson {
        &self.lessons[self.current]
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    #[must_use]
    pub fn position(&self) -> DemoPosition {
        DemoPosition {
            lesson_number: self.current + 1,
            lesson_count: self.lessons.len(),
        }
    }

    /// Questions answered correctly so far, in completion order.
    #[must_use]
    pub fn completed_questions(&self) -> &[QuestionId] {
        &self.completed
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Apply one learner action.
    ///
    /// Completion credit reaches the tracker before this returns, so the
    /// session and progress are consistent whenever the caller looks at them.
    /// Rejected actions are logged and reported as `IntentOutcome::Ignored`.
    pub fn apply(&mut self, intent: LessonIntent, at: DateTime<Utc>) -> IntentOutcome {
        let question_id = self.session.question().id().clone();
        let result = match intent {
            LessonIntent::Select(answer_id) => self
                .session
                .select_answer(&answer_id)
                .map(|()| IntentOutcome::Selected(answer_id)),
            LessonIntent::ToggleHint => self
                .session
                .toggle_hint()
                .map(|visible| IntentOutcome::HintToggled { visible }),
            LessonIntent::Reveal => self.session.reveal(at).map(|resolution| {
                tracing::debug!(
                    question = %question_id,
                    verdict = ?resolution.verdict,
                    "Question resolved"
                );
                let credit = resolution
                    .completion
                    .and_then(|event| self.credit_completion(event));
                IntentOutcome::Revealed {
                    verdict: resolution.verdict,
                    credit,
                }
            }),
            LessonIntent::Advance => Ok(self.advance()),
        };

        result.unwrap_or_else(|err| {
            tracing::debug!(question = %question_id, error = %err, "Ignored learner action");
            IntentOutcome::Ignored(err)
        })
    }

    fn credit_completion(&mut self, event: LessonCompleted) -> Option<CompletionCredit> {
        if self.completed.contains(&event.question_id) {
            tracing::debug!(question = %event.question_id, "Lesson already counted in this demo");
            return None;
        }
        self.completed.push(event.question_id.clone());

        let stage_id = self.current_lesson().stage_id.clone();
        match self.progress.record_completion(&stage_id) {
            Ok(stage_progress) => {
                tracing::info!(
                    question = %event.question_id,
                    stage = %stage_id,
                    completed = stage_progress.completed,
                    total = stage_progress.total,
                    completed_at = %event.completed_at,
                    "Lesson completed"
                );
                Some(CompletionCredit {
                    question_id: event.question_id,
                    stage_id,
                    stage_progress,
                    completed_at: event.completed_at,
                })
            }
            Err(err) => {
                tracing::warn!(
                    question = %event.question_id,
                    error = %err,
                    "Completion not credited"
                );
                None
            }
        }
    }

    fn advance(&mut self) -> IntentOutcome {
        let advanced = self.session.advance();
        self.current = (self.current + 1) % self.lessons.len();
        self.session = QuestionSession::new(Arc::clone(&self.lessons[self.current].question));

        tracing::debug!(
            from = %advanced.question_id,
            to = %self.session.question().id(),
            skipped = advanced.skipped(),
            "Advanced to next lesson"
        );
        IntentOutcome::Advanced {
            skipped: advanced.skipped(),
            from: advanced.question_id,
        }
    }
}

impl fmt::Debug for DemoSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoSession")
            .field("lessons_len", &self.lessons.len())
            .field("current", &self.current)
            .field("session", &self.session)
            .field("completed", &self.completed)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
