use serde::{Deserialize, Serialize};

use crate::model::ids::StageId;

/// Where a stage sits in the learner's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Locked,
    Current,
    Completed,
}

/// A named group of lessons with aggregate completion counts.
///
/// Counts are taken as supplied. A locked stage with completed lessons, or a
/// stage with `completed_lessons > total_lessons`, is the caller's truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    id: StageId,
    title: String,
    status: StageStatus,
    total_lessons: u32,
    #[serde(default)]
    completed_lessons: u32,
}

impl Stage {
    #[must_use]
    pub fn new(
        id: StageId,
        title: impl Into<String>,
        status: StageStatus,
        total_lessons: u32,
        completed_lessons: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            total_lessons,
            completed_lessons,
        }
    }

    #[must_use]
    pub fn id(&self) -> &StageId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn status(&self) -> StageStatus {
        self.status
    }

    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        self.total_lessons
    }

    #[must_use]
    pub fn completed_lessons(&self) -> u32 {
        self.completed_lessons
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == StageStatus::Locked
    }

    /// Count one more completed lesson, saturating at `total_lessons`.
    ///
    /// Returns `false` when the stage was already full.
    pub(crate) fn record_lesson(&mut self) -> bool {
        if self.completed_lessons >= self.total_lessons {
            return false;
        }
        self.completed_lessons += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_lesson_saturates() {
        let mut stage = Stage::new(StageId::new("s").unwrap(), "S", StageStatus::Current, 1, 0);
        assert!(stage.record_lesson());
        assert!(!stage.record_lesson());
        assert_eq!(stage.completed_lessons(), 1);
    }

    #[test]
    fn over_full_stage_is_left_alone() {
        let mut stage = Stage::new(StageId::new("s").unwrap(), "S", StageStatus::Locked, 2, 5);
        assert!(!stage.record_lesson());
        assert_eq!(stage.completed_lessons(), 5);
    }

    #[test]
    fn deserializes_lowercase_status() {
        let json = r#"{"id":"trees","title":"Trees","status":"locked","total_lessons":6}"#;
        let stage: Stage = serde_json::from_str(json).unwrap();
        assert_eq!(stage.status(), StageStatus::Locked);
        assert_eq!(stage.completed_lessons(), 0);
        assert!(stage.is_locked());
    }
}
