use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{AnswerId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least one answer")]
    NoAnswers,

    #[error("answer text cannot be empty (answer {0})")]
    EmptyAnswerText(AnswerId),

    #[error("answer id {0} appears more than once")]
    DuplicateAnswer(AnswerId),

    #[error("question has no correct answer")]
    NoCorrectAnswer,

    #[error("question has {count} correct answers, expected exactly one")]
    MultipleCorrectAnswers { count: usize },
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated answer as supplied by a content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDraft {
    pub id: AnswerId,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Unvalidated question as supplied by a content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    #[serde(default)]
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub answers: Vec<AnswerDraft>,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub time_estimate: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the answer list is empty,
    /// answer ids repeat, or the number of correct answers is not exactly one.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.answers.is_empty() {
            return Err(QuestionError::NoAnswers);
        }

        let mut seen = HashSet::with_capacity(self.answers.len());
        for answer in &self.answers {
            if answer.text.trim().is_empty() {
                return Err(QuestionError::EmptyAnswerText(answer.id.clone()));
            }
            if !seen.insert(&answer.id) {
                return Err(QuestionError::DuplicateAnswer(answer.id.clone()));
            }
        }

        match self.answers.iter().filter(|a| a.is_correct).count() {
            0 => return Err(QuestionError::NoCorrectAnswer),
            1 => {}
            count => return Err(QuestionError::MultipleCorrectAnswers { count }),
        }

        let answers = self
            .answers
            .into_iter()
            .map(|draft| Answer {
                id: draft.id,
                text: draft.text,
                is_correct: draft.is_correct,
                explanation: draft.explanation.filter(|e| !e.trim().is_empty()),
            })
            .collect();

        Ok(Question {
            id: self.id,
            title: self.title,
            prompt: self.prompt,
            description: self.description,
            code: self.code.filter(|c| !c.trim().is_empty()),
            answers,
            hint: self.hint,
            time_estimate: self.time_estimate,
        })
    }
}

//
// ─── VALIDATED CONTENT ─────────────────────────────────────────────────────────
//

/// One candidate response to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: AnswerId,
    text: String,
    is_correct: bool,
    explanation: Option<String>,
}

impl Answer {
    #[must_use]
    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

/// A validated, immutable assessment unit.
///
/// Holds exactly one correct answer and a non-empty list of uniquely
/// identified answers. Display fields are opaque to the session logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    title: String,
    prompt: String,
    description: String,
    code: Option<String>,
    answers: Vec<Answer>,
    hint: String,
    time_estimate: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional code sample shown with the prompt.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Answers in the order the content source supplied them.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|answer| &answer.id == id)
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.is_correct)
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Opaque display value such as `"2 min"`.
    #[must_use]
    pub fn time_estimate(&self) -> &str {
        &self.time_estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(id: &str, is_correct: bool) -> AnswerDraft {
        AnswerDraft {
            id: AnswerId::new(id).unwrap(),
            text: format!("Answer {id}"),
            is_correct,
            explanation: None,
        }
    }

    fn draft(answers: Vec<AnswerDraft>) -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new("q1").unwrap(),
            title: "Title".into(),
            prompt: "Which one?".into(),
            description: String::new(),
            code: None,
            answers,
            hint: "Think".into(),
            time_estimate: "1 min".into(),
        }
    }

    #[test]
    fn validates_single_correct_answer() {
        let question = draft(vec![answer("a", false), answer("b", true)])
            .validate()
            .unwrap();

        assert_eq!(question.answers().len(), 2);
        assert_eq!(question.correct_answer().unwrap().id().as_str(), "b");
        assert!(question.answer(&AnswerId::new("a").unwrap()).is_some());
        assert!(question.answer(&AnswerId::new("z").unwrap()).is_none());
    }

    #[test]
    fn rejects_empty_answer_list() {
        let err = draft(Vec::new()).validate().unwrap_err();
        assert_eq!(err, QuestionError::NoAnswers);
    }

    #[test]
    fn rejects_missing_and_multiple_correct_answers() {
        let none = draft(vec![answer("a", false), answer("b", false)])
            .validate()
            .unwrap_err();
        assert_eq!(none, QuestionError::NoCorrectAnswer);

        let many = draft(vec![answer("a", true), answer("b", true), answer("c", false)])
            .validate()
            .unwrap_err();
        assert_eq!(many, QuestionError::MultipleCorrectAnswers { count: 2 });
    }

    #[test]
    fn rejects_duplicate_answer_ids() {
        let err = draft(vec![answer("a", true), answer("a", false)])
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateAnswer(AnswerId::new("a").unwrap()));
    }

    #[test]
    fn rejects_blank_prompt() {
        let mut d = draft(vec![answer("a", true)]);
        d.prompt = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn blank_code_and_explanations_are_dropped() {
        let mut d = draft(vec![AnswerDraft {
            explanation: Some(" ".into()),
            ..answer("a", true)
        }]);
        d.code = Some(String::new());

        let question = d.validate().unwrap();
        assert!(question.code().is_none());
        assert!(question.answers()[0].explanation().is_none());
    }
}
