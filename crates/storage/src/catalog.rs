use lesson_core::model::{Lesson, QuestionDraft, QuestionId, Stage, StageId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::repository::StorageError;

/// Serialized lesson entry: a question draft tagged with its stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDocument {
    pub stage: StageId,
    pub question: QuestionDraft,
}

/// Serialized catalog shape, as read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub current_stage: StageId,
    pub stages: Vec<Stage>,
    pub lessons: Vec<LessonDocument>,
}

impl CatalogDocument {
    /// Validate every question and resolve lesson stages.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DuplicateStage` for repeated stage ids,
    /// `StorageError::UnknownCurrentStage` when the current stage is not listed,
    /// `StorageError::InvalidContent` for a question that fails validation,
    /// `StorageError::DuplicateQuestion` for repeated question ids and
    /// `StorageError::UnknownStage` for a lesson whose stage is not listed.
    pub fn into_catalog(self) -> Result<Catalog, StorageError> {
        let mut stage_ids: HashSet<&StageId> = HashSet::with_capacity(self.stages.len());
        for stage in &self.stages {
            if !stage_ids.insert(stage.id()) {
                return Err(StorageError::DuplicateStage(stage.id().clone()));
            }
        }
        if !stage_ids.contains(&self.current_stage) {
            return Err(StorageError::UnknownCurrentStage(self.current_stage.clone()));
        }

        let mut seen: HashSet<QuestionId> = HashSet::with_capacity(self.lessons.len());
        let mut lessons = Vec::with_capacity(self.lessons.len());

        for entry in self.lessons {
            let question_id = entry.question.id.clone();
            if !seen.insert(question_id.clone()) {
                return Err(StorageError::DuplicateQuestion(question_id));
            }
            if !stage_ids.contains(&entry.stage) {
                return Err(StorageError::UnknownStage {
                    question_id,
                    stage_id: entry.stage,
                });
            }
            let question = entry
                .question
                .validate()
                .map_err(|source| StorageError::InvalidContent {
                    question_id: question_id.clone(),
                    source,
                })?;
            lessons.push(Lesson::new(entry.stage, question));
        }

        Ok(Catalog {
            current_stage: self.current_stage,
            stages: self.stages,
            lessons,
        })
    }
}

/// Validated content for one demo: lessons, stages and the current stage designator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub current_stage: StageId,
    pub stages: Vec<Stage>,
    pub lessons: Vec<Lesson>,
}
