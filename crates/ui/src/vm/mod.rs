mod lesson_vm;
mod progress_vm;

pub use lesson_vm::{
    AnswerOptionVm, ButtonVm, CardAction, LessonCardVm, OptionState, map_lesson_card,
};
pub use progress_vm::{
    ConnectorState, CurrentStageVm, ProgressVm, StageRowVm, connectors, map_progress,
};
