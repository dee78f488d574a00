#![forbid(unsafe_code)]

pub mod demo;
pub mod error;

pub use lesson_core::Clock;

pub use demo::{
    CompletionCredit, DemoLoopService, DemoPosition, DemoSession, IntentOutcome, LessonIntent,
};
pub use error::DemoError;
