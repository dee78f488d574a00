use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::model::{Answer, AnswerId, Question, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Learner actions that can be rejected by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    SelectAnswer,
    Reveal,
    ToggleHint,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionAction::SelectAnswer => "selecting an answer",
            SessionAction::Reveal => "revealing",
            SessionAction::ToggleHint => "toggling the hint",
        };
        f.write_str(name)
    }
}

/// Rejections raised by `QuestionSession`.
///
/// None of these are fatal: a rejected action leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{action} is not allowed once the question is resolved")]
    InvalidState { action: SessionAction },

    #[error("an answer must be selected before revealing")]
    PreconditionFailed,

    #[error("answer {0} does not belong to this question")]
    UnknownAnswer(AnswerId),
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Correctness of a resolved answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Correctness as seen from outside: unknown until the session resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => Outcome::Correct,
            Verdict::Incorrect => Outcome::Incorrect,
        }
    }
}

/// Emitted once when a session resolves with the correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCompleted {
    pub question_id: QuestionId,
    pub completed_at: DateTime<Utc>,
}

/// Result of a successful `reveal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub selected: AnswerId,
    pub verdict: Verdict,
    pub completion: Option<LessonCompleted>,
}

/// Signal returned by `advance`: the caller should load the next question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advanced {
    pub question_id: QuestionId,
    /// `None` when the learner moved on without resolving.
    pub outcome: Option<Verdict>,
}

impl Advanced {
    #[must_use]
    pub fn skipped(&self) -> bool {
        self.outcome.is_none()
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Interaction state for one question.
///
/// The hint only exists before resolution, and a resolved session always
/// carries both the selected answer and its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unanswered { hint_visible: bool },
    Answered { selected: AnswerId, hint_visible: bool },
    Resolved { selected: AnswerId, verdict: Verdict },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Unanswered { hint_visible: false }
    }
}

impl SessionState {
    #[must_use]
    pub fn selected(&self) -> Option<&AnswerId> {
        match self {
            SessionState::Unanswered { .. } => None,
            SessionState::Answered { selected, .. } | SessionState::Resolved { selected, .. } => {
                Some(selected)
            }
        }
    }

    #[must_use]
    pub fn hint_visible(&self) -> bool {
        match self {
            SessionState::Unanswered { hint_visible }
            | SessionState::Answered { hint_visible, .. } => *hint_visible,
            SessionState::Resolved { .. } => false,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Resolved { .. })
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            SessionState::Resolved { verdict, .. } => (*verdict).into(),
            _ => Outcome::Unknown,
        }
    }
}

/// Render-facing copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub question_id: QuestionId,
    pub selected: Option<AnswerId>,
    pub hint_visible: bool,
    pub resolved: bool,
    pub outcome: Outcome,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Drives one question from selection through resolution.
///
/// Selection may change freely until `reveal`; after that only `advance` is
/// accepted. Because a second `reveal` is rejected, a correct answer yields at
/// most one `LessonCompleted` per session.
#[derive(Clone)]
pub struct QuestionSession {
    question: Arc<Question>,
    state: SessionState,
}

impl QuestionSession {
    #[must_use]
    pub fn new(question: Arc<Question>) -> Self {
        Self {
            question,
            state: SessionState::default(),
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Select (or replace) the learner's answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` once resolved and
    /// `SessionError::UnknownAnswer` if the id is not one of the question's answers.
    pub fn select_answer(&mut self, answer_id: &AnswerId) -> Result<(), SessionError> {
        let hint_visible = match &self.state {
            SessionState::Resolved { .. } => {
                return Err(SessionError::InvalidState {
                    action: SessionAction::SelectAnswer,
                });
            }
            state => state.hint_visible(),
        };
        if self.question.answer(answer_id).is_none() {
            return Err(SessionError::UnknownAnswer(answer_id.clone()));
        }

        self.state = SessionState::Answered {
            selected: answer_id.clone(),
            hint_visible,
        };
        Ok(())
    }

    /// Resolve the current selection.
    ///
    /// `at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PreconditionFailed` if nothing is selected and
    /// `SessionError::InvalidState` if the session already resolved.
    pub fn reveal(&mut self, at: DateTime<Utc>) -> Result<Resolution, SessionError> {
        let selected = match &self.state {
            SessionState::Unanswered { .. } => return Err(SessionError::PreconditionFailed),
            SessionState::Resolved { .. } => {
                return Err(SessionError::InvalidState {
                    action: SessionAction::Reveal,
                });
            }
            SessionState::Answered { selected, .. } => selected.clone(),
        };
        let answer = self
            .question
            .answer(&selected)
            .ok_or_else(|| SessionError::UnknownAnswer(selected.clone()))?;

        let verdict = if answer.is_correct() {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        self.state = SessionState::Resolved {
            selected: selected.clone(),
            verdict,
        };

        let completion = (verdict == Verdict::Correct).then(|| LessonCompleted {
            question_id: self.question.id().clone(),
            completed_at: at,
        });

        Ok(Resolution {
            selected,
            verdict,
            completion,
        })
    }

    /// Show or hide the hint, returning the new visibility.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` once resolved.
    pub fn toggle_hint(&mut self) -> Result<bool, SessionError> {
        match &mut self.state {
            SessionState::Unanswered { hint_visible }
            | SessionState::Answered { hint_visible, .. } => {
                *hint_visible = !*hint_visible;
                Ok(*hint_visible)
            }
            SessionState::Resolved { .. } => Err(SessionError::InvalidState {
                action: SessionAction::ToggleHint,
            }),
        }
    }

    /// Leave the question, resolved or not, and reset to the unanswered state.
    pub fn advance(&mut self) -> Advanced {
        let outcome = match std::mem::take(&mut self.state) {
            SessionState::Resolved { verdict, .. } => Some(verdict),
            _ => None,
        };
        Advanced {
            question_id: self.question.id().clone(),
            outcome,
        }
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&Answer> {
        self.state
            .selected()
            .and_then(|selected| self.question.answer(selected))
    }

    /// Explanation of the selected answer, available only after resolution.
    #[must_use]
    pub fn revealed_explanation(&self) -> Option<&str> {
        if !self.state.is_resolved() {
            return None;
        }
        self.selected_answer().and_then(Answer::explanation)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            question_id: self.question.id().clone(),
            selected: self.state.selected().cloned(),
            hint_visible: self.state.hint_visible(),
            resolved: self.state.is_resolved(),
            outcome: self.state.outcome(),
        }
    }
}

impl fmt::Debug for QuestionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionSession")
            .field("question_id", self.question.id())
            .field("answers_len", &self.question.answers().len())
            .field("state", &self.state)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
