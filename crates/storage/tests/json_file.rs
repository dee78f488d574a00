use std::path::PathBuf;

use storage::{ContentRepository, InMemoryContent, StorageError, sample};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lesson-storage-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn loads_catalog_from_file() {
    let path = temp_path("catalog.json");
    tokio::fs::write(&path, sample::demo_json()).await.unwrap();

    let repo = InMemoryContent::from_json_file(&path).await.unwrap();
    let lessons = repo.lessons().await.unwrap();
    let stages = repo.stages().await.unwrap();

    assert_eq!(lessons.len(), 3);
    assert_eq!(lessons[1].stage_id.as_str(), "arrays");
    assert_eq!(stages.len(), 5);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let path = temp_path("does-not-exist.json");

    let err = InMemoryContent::from_json_file(&path).await.unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[tokio::test]
async fn invalid_question_in_file_is_rejected() {
    let path = temp_path("no-correct.json");
    let raw = sample::demo_json().replace("\"is_correct\": true", "\"is_correct\": false");
    tokio::fs::write(&path, raw).await.unwrap();

    let err = InMemoryContent::from_json_file(&path).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidContent { .. }));

    let _ = tokio::fs::remove_file(&path).await;
}
