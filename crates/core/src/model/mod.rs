mod ids;
mod lesson;
mod question;
mod stage;

pub use ids::{AnswerId, ParseIdError, QuestionId, StageId};

pub use lesson::Lesson;
pub use question::{Answer, AnswerDraft, Question, QuestionDraft, QuestionError};
pub use stage::{Stage, StageStatus};
