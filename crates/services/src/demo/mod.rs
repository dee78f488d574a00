mod intent;
mod position;
mod queries;
mod service;
mod workflow;

// Public API of the demo subsystem.
pub use crate::error::DemoError;
pub use intent::{CompletionCredit, IntentOutcome, LessonIntent};
pub use position::DemoPosition;
pub use service::DemoSession;
pub use workflow::DemoLoopService;
