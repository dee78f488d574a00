use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use lesson_core::model::{AnswerId, Lesson, Stage, StageId, StageStatus};
use lesson_core::time::fixed_now;
use lesson_core::{LessonFraction, Outcome, Verdict};
use services::{Clock, DemoError, DemoLoopService, IntentOutcome, LessonIntent};
use storage::{Catalog, ContentRepository, InMemoryContent, StorageError, sample};

fn answer(raw: &str) -> LessonIntent {
    LessonIntent::Select(AnswerId::new(raw).unwrap())
}

fn stage(raw: &str) -> StageId {
    StageId::new(raw).unwrap()
}

fn sample_service() -> DemoLoopService {
    let content = sample::demo_content().unwrap();
    DemoLoopService::new(Clock::fixed(fixed_now()), Arc::new(content))
}

struct BrokenContent;

#[async_trait]
impl ContentRepository for BrokenContent {
    async fn lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Err(io::Error::from(io::ErrorKind::NotFound).into())
    }

    async fn stages(&self) -> Result<Vec<Stage>, StorageError> {
        Err(io::Error::from(io::ErrorKind::NotFound).into())
    }

    async fn current_stage(&self) -> Result<StageId, StorageError> {
        Err(io::Error::from(io::ErrorKind::NotFound).into())
    }
}

#[tokio::test]
async fn demo_loop_switch_answer_then_resolve() {
    let service = sample_service();
    let mut demo = service.start_demo().await.unwrap();
    assert_eq!(demo.started_at(), fixed_now());

    // lesson 1: "b" is wrong, "a" is right
    service.apply(&mut demo, answer("b"));
    assert_eq!(demo.session().snapshot().selected, Some(AnswerId::new("b").unwrap()));
    service.apply(&mut demo, answer("a"));

    let outcome = service.apply(&mut demo, LessonIntent::Reveal);
    let IntentOutcome::Revealed { verdict, credit } = outcome else {
        panic!("expected reveal");
    };
    assert_eq!(verdict, Verdict::Correct);
    let credit = credit.expect("credited");
    assert_eq!(credit.stage_progress, LessonFraction::new(3, 4));
    assert_eq!(credit.completed_at, fixed_now());

    assert!(service.apply(&mut demo, answer("b")).is_ignored());
    assert_eq!(demo.session().snapshot().outcome, Outcome::Correct);
    assert_eq!(demo.session().snapshot().selected, Some(AnswerId::new("a").unwrap()));

    assert_eq!(demo.progress().overall_progress(), LessonFraction::new(7, 22));
    assert_eq!(demo.progress().current().unwrap().percent_complete, 75);
}

#[tokio::test]
async fn demo_loop_try_again_after_wrong_answer() {
    let service = sample_service();
    let mut demo = service.start_demo().await.unwrap();

    service.apply(&mut demo, answer("d"));
    service.apply(&mut demo, LessonIntent::Reveal);
    let outcome = service.apply(&mut demo, LessonIntent::Advance);
    assert!(matches!(outcome, IntentOutcome::Advanced { skipped: false, .. }));

    // rotate back round to the first question
    service.apply(&mut demo, LessonIntent::Advance);
    service.apply(&mut demo, LessonIntent::Advance);
    assert_eq!(demo.position().lesson_number, 1);

    service.apply(&mut demo, answer("a"));
    let outcome = service.apply(&mut demo, LessonIntent::Reveal);
    assert!(matches!(
        outcome,
        IntentOutcome::Revealed {
            verdict: Verdict::Correct,
            credit: Some(_)
        }
    ));
    assert_eq!(demo.completed_questions().len(), 1);
}

#[tokio::test]
async fn stage_override_changes_current_stage() {
    let service = sample_service().with_current_stage(Some(stage("sorting")));
    let demo = service.start_demo().await.unwrap();

    let current = demo.progress().current().unwrap();
    assert_eq!(current.stage.id(), &stage("sorting"));
    assert_eq!(current.percent_complete, 20);
}

#[tokio::test]
async fn unknown_stage_override_is_rejected() {
    let service = sample_service().with_current_stage(Some(stage("quantum")));
    let err = service.start_demo().await.unwrap_err();
    assert!(matches!(err, DemoError::UnknownStage(ref id) if id.as_str() == "quantum"));
}

#[tokio::test]
async fn empty_catalog_is_rejected() {
    let catalog = Catalog {
        current_stage: stage("only"),
        stages: vec![Stage::new(stage("only"), "Only", StageStatus::Current, 1, 0)],
        lessons: Vec::new(),
    };
    let service = DemoLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(InMemoryContent::new(catalog)),
    );

    let err = service.start_demo().await.unwrap_err();
    assert!(matches!(err, DemoError::EmptyCatalog));
}

#[tokio::test]
async fn content_failures_surface_as_storage_errors() {
    let service = DemoLoopService::new(Clock::fixed(fixed_now()), Arc::new(BrokenContent));
    let err = service.start_demo().await.unwrap_err();
    assert!(matches!(
        err,
        DemoError::Storage(StorageError::Io(ref source)) if source.kind() == io::ErrorKind::NotFound
    ));
}
