use async_trait::async_trait;
use lesson_core::model::{Lesson, QuestionError, QuestionId, Stage, StageId};
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::Catalog;

/// Errors surfaced by content sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid question {question_id}: {source}")]
    InvalidContent {
        question_id: QuestionId,
        #[source]
        source: QuestionError,
    },

    #[error("question {question_id} belongs to unknown stage {stage_id}")]
    UnknownStage {
        question_id: QuestionId,
        stage_id: StageId,
    },

    #[error("question id {0} appears more than once")]
    DuplicateQuestion(QuestionId),

    #[error("stage id {0} appears more than once")]
    DuplicateStage(StageId),

    #[error("current stage {0} is not in the stage list")]
    UnknownCurrentStage(StageId),
}

/// Read-only feed of lesson content and stage layout.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lessons in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the content cannot be read.
    async fn lessons(&self) -> Result<Vec<Lesson>, StorageError>;

    /// Stages in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the content cannot be read.
    async fn stages(&self) -> Result<Vec<Stage>, StorageError>;

    /// The stage designated as "currently learning".
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the content cannot be read.
    async fn current_stage(&self) -> Result<StageId, StorageError>;
}

/// Content repository over an already validated catalog.
///
/// Cloning is cheap; clones share the same catalog.
#[derive(Debug, Clone)]
pub struct InMemoryContent {
    catalog: Arc<Catalog>,
}

impl InMemoryContent {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl ContentRepository for InMemoryContent {
    async fn lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Ok(self.catalog.lessons.clone())
    }

    async fn stages(&self) -> Result<Vec<Stage>, StorageError> {
        Ok(self.catalog.stages.clone())
    }

    async fn current_stage(&self) -> Result<StageId, StorageError> {
        Ok(self.catalog.current_stage.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[tokio::test]
    async fn in_memory_content_serves_catalog() {
        let repo = InMemoryContent::new(sample::demo_catalog().unwrap());

        let lessons = repo.lessons().await.unwrap();
        let stages = repo.stages().await.unwrap();
        let current = repo.current_stage().await.unwrap();

        assert_eq!(lessons.len(), 3);
        assert_eq!(stages.len(), 5);
        assert_eq!(current.as_str(), "search");
    }

    #[tokio::test]
    async fn clones_share_questions() {
        let repo = InMemoryContent::new(sample::demo_catalog().unwrap());
        let clone = repo.clone();

        let a = repo.lessons().await.unwrap();
        let b = clone.lessons().await.unwrap();
        assert!(Arc::ptr_eq(&a[0].question, &b[0].question));
    }
}
