use thiserror::Error;

use crate::model::{Stage, StageId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("stage not found: {0}")]
    NotFound(StageId),
}

/// Completed-over-total lesson counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LessonFraction {
    pub completed: u32,
    pub total: u32,
}

impl LessonFraction {
    #[must_use]
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }

    /// Whole percentage, rounded half up. An empty total reads as 0%.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let completed = u64::from(self.completed);
        let total = u64::from(self.total);
        let rounded = (200 * completed + total) / (2 * total);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

impl From<&Stage> for LessonFraction {
    fn from(stage: &Stage) -> Self {
        Self::new(stage.completed_lessons(), stage.total_lessons())
    }
}

/// The stage currently being learned, with its completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentStage<'a> {
    pub stage: &'a Stage,
    pub percent_complete: u32,
}

/// Ordered stage list with completion tracking.
///
/// Stage order is kept exactly as supplied. The only mutation is
/// `record_completion`, which never pushes a stage past its lesson total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    stages: Vec<Stage>,
    current: StageId,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(stages: Vec<Stage>, current: StageId) -> Self {
        Self { stages, current }
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The designator of the stage shown as "currently learning".
    #[must_use]
    pub fn current_stage_id(&self) -> &StageId {
        &self.current
    }

    #[must_use]
    pub fn stage(&self, stage_id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.id() == stage_id)
    }

    /// Count a completed lesson toward `stage_id`.
    ///
    /// Saturates at the stage's lesson total; repeated calls on a full stage
    /// leave it unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` if no stage has that id.
    pub fn record_completion(
        &mut self,
        stage_id: &StageId,
    ) -> Result<LessonFraction, ProgressError> {
        let stage = self
            .stages
            .iter_mut()
            .find(|stage| stage.id() == stage_id)
            .ok_or_else(|| ProgressError::NotFound(stage_id.clone()))?;
        stage.record_lesson();
        Ok(LessonFraction::from(&*stage))
    }

    /// Sum of completed and total lessons across all stages.
    #[must_use]
    pub fn overall_progress(&self) -> LessonFraction {
        self.stages
            .iter()
            .fold(LessonFraction::default(), |acc, stage| LessonFraction {
                completed: acc.completed.saturating_add(stage.completed_lessons()),
                total: acc.total.saturating_add(stage.total_lessons()),
            })
    }

    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` if no stage has that id.
    pub fn stage_progress(&self, stage_id: &StageId) -> Result<LessonFraction, ProgressError> {
        self.stage(stage_id)
            .map(LessonFraction::from)
            .ok_or_else(|| ProgressError::NotFound(stage_id.clone()))
    }

    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` if no stage has that id.
    pub fn current_stage(&self, stage_id: &StageId) -> Result<CurrentStage<'_>, ProgressError> {
        let stage = self
            .stage(stage_id)
            .ok_or_else(|| ProgressError::NotFound(stage_id.clone()))?;
        Ok(CurrentStage {
            stage,
            percent_complete: LessonFraction::from(stage).percent(),
        })
    }

    /// `current_stage` for the tracker's own designator.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` if the designator matches no stage.
    pub fn current(&self) -> Result<CurrentStage<'_>, ProgressError> {
        self.current_stage(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StageStatus;

    fn sid(raw: &str) -> StageId {
        StageId::new(raw).unwrap()
    }

    fn stage(id: &str, completed: u32, total: u32) -> Stage {
        Stage::new(sid(id), id.to_uppercase(), StageStatus::Current, total, completed)
    }

    #[test]
    fn overall_progress_of_empty_tracker_is_zero() {
        let tracker = ProgressTracker::new(Vec::new(), sid("none"));
        assert_eq!(tracker.overall_progress(), LessonFraction::new(0, 0));
    }

    #[test]
    fn overall_progress_sums_stages() {
        let tracker = ProgressTracker::new(vec![stage("a", 2, 3), stage("b", 0, 4)], sid("a"));
        assert_eq!(tracker.overall_progress(), LessonFraction::new(2, 7));
    }

    #[test]
    fn record_completion_caps_at_total() {
        let mut tracker = ProgressTracker::new(vec![stage("search", 2, 4)], sid("search"));

        let after = tracker.record_completion(&sid("search")).unwrap();
        assert_eq!(after.completed, 3);

        for _ in 0..4 {
            tracker.record_completion(&sid("search")).unwrap();
        }
        assert_eq!(
            tracker.stage_progress(&sid("search")).unwrap(),
            LessonFraction::new(4, 4)
        );
    }

    #[test]
    fn unknown_stage_is_not_found() {
        let mut tracker = ProgressTracker::new(vec![stage("a", 0, 1)], sid("a"));
        let before = tracker.clone();

        assert_eq!(
            tracker.record_completion(&sid("zzz")).unwrap_err(),
            ProgressError::NotFound(sid("zzz"))
        );
        assert!(tracker.stage_progress(&sid("zzz")).is_err());
        assert!(tracker.current_stage(&sid("zzz")).is_err());
        assert_eq!(tracker, before);
    }

    #[test]
    fn current_stage_percent() {
        let tracker =
            ProgressTracker::new(vec![stage("half", 2, 4), stage("empty", 0, 0)], sid("half"));

        assert_eq!(tracker.current().unwrap().percent_complete, 50);
        assert_eq!(tracker.current_stage(&sid("empty")).unwrap().percent_complete, 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(LessonFraction::new(1, 3).percent(), 33);
        assert_eq!(LessonFraction::new(2, 3).percent(), 67);
        assert_eq!(LessonFraction::new(1, 8).percent(), 13);
        assert_eq!(LessonFraction::new(5, 5).percent(), 100);
    }

    #[test]
    fn stages_keep_supplied_order() {
        let tracker = ProgressTracker::new(
            vec![stage("c", 0, 1), stage("a", 0, 1), stage("b", 0, 1)],
            sid("a"),
        );
        let ids: Vec<_> = tracker.stages().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
