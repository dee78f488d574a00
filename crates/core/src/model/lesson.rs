use std::sync::Arc;

use crate::model::{Question, StageId};

/// A question placed in the stage it counts toward.
///
/// The question is shared read-only between the catalog and the sessions built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub stage_id: StageId,
    pub question: Arc<Question>,
}

impl Lesson {
    #[must_use]
    pub fn new(stage_id: StageId, question: Question) -> Self {
        Self {
            stage_id,
            question: Arc::new(question),
        }
    }
}
