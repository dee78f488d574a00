#![forbid(unsafe_code)]

pub mod render;
pub mod vm;

pub use render::{render_lesson_card, render_progress};
pub use vm::{LessonCardVm, ProgressVm, map_lesson_card, map_progress};
