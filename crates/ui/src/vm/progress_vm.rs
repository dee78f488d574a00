use lesson_core::model::{Stage, StageId, StageStatus};
use lesson_core::{LessonFraction, ProgressTracker};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageRowVm {
    pub id: StageId,
    pub title: String,
    pub status: StageStatus,
    pub lessons_label: String,
}

/// Link drawn between two adjacent stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorState {
    Active,
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentStageVm {
    pub title: String,
    pub percent: u32,
    pub percent_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub rows: Vec<StageRowVm>,
    /// One entry per adjacent pair of rows.
    pub connectors: Vec<ConnectorState>,
    pub overall_label: String,
    pub current: Option<CurrentStageVm>,
}

/// A connector lights up when the stage it leads into is not locked.
#[must_use]
pub fn connectors(stages: &[Stage]) -> Vec<ConnectorState> {
    stages
        .windows(2)
        .map(|pair| {
            if pair[1].is_locked() {
                ConnectorState::Inactive
            } else {
                ConnectorState::Active
            }
        })
        .collect()
}

fn fraction_label(fraction: LessonFraction) -> String {
    format!("{} / {}", fraction.completed, fraction.total)
}

#[must_use]
pub fn map_progress(tracker: &ProgressTracker) -> ProgressVm {
    let rows = tracker
        .stages()
        .iter()
        .map(|stage| StageRowVm {
            id: stage.id().clone(),
            title: stage.title().to_string(),
            status: stage.status(),
            lessons_label: format!(
                "{}/{} lessons",
                stage.completed_lessons(),
                stage.total_lessons()
            ),
        })
        .collect();

    // A missing current stage renders no detail panel.
    let current = tracker.current().ok().map(|current| CurrentStageVm {
        title: current.stage.title().to_string(),
        percent: current.percent_complete,
        percent_label: format!("{}%", current.percent_complete),
    });

    ProgressVm {
        rows,
        connectors: connectors(tracker.stages()),
        overall_label: fraction_label(tracker.overall_progress()),
        current,
    }
}
