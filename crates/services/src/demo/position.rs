/// Where the learner is in the lesson rotation, for the "Lesson N of M" header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoPosition {
    /// 1-based.
    pub lesson_number: usize,
    pub lesson_count: usize,
}
