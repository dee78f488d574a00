#![forbid(unsafe_code)]

pub mod model;
pub mod progress;
pub mod session;
pub mod time;

pub use progress::{CurrentStage, LessonFraction, ProgressError, ProgressTracker};
pub use session::{
    Advanced, LessonCompleted, Outcome, QuestionSession, Resolution, SessionAction, SessionError,
    SessionSnapshot, SessionState, Verdict,
};
pub use time::Clock;
