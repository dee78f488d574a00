//! JSON catalog loading.

use std::path::Path;

use crate::catalog::{Catalog, CatalogDocument};
use crate::repository::{InMemoryContent, StorageError};

/// Parse and validate a catalog from a JSON string.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON and the
/// validation errors of `CatalogDocument::into_catalog` otherwise.
pub fn parse_catalog(raw: &str) -> Result<Catalog, StorageError> {
    let document: CatalogDocument = serde_json::from_str(raw)?;
    document.into_catalog()
}

/// Read, parse and validate a catalog file.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, plus any error of `parse_catalog`.
pub async fn read_catalog(path: impl AsRef<Path>) -> Result<Catalog, StorageError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let catalog = parse_catalog(&raw)?;
    tracing::info!(
        path = %path.display(),
        lessons = catalog.lessons.len(),
        stages = catalog.stages.len(),
        "Loaded lesson catalog"
    );
    Ok(catalog)
}

/// Serialize a catalog document as pretty JSON.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if serialization fails.
pub fn to_json(document: &CatalogDocument) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(document)?)
}

impl InMemoryContent {
    /// # Errors
    ///
    /// See `parse_catalog`.
    pub fn from_json_str(raw: &str) -> Result<Self, StorageError> {
        parse_catalog(raw).map(Self::new)
    }

    /// # Errors
    ///
    /// See `read_catalog`.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        read_catalog(path).await.map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "current_stage": "arrays",
        "stages": [
            { "id": "arrays", "title": "Arrays", "status": "current", "total_lessons": 2, "completed_lessons": 1 }
        ],
        "lessons": [
            {
                "stage": "arrays",
                "question": {
                    "id": "q1",
                    "prompt": "Array access by index?",
                    "answers": [
                        { "id": "a", "text": "O(1)", "is_correct": true },
                        { "id": "b", "text": "O(n)" }
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_minimal_catalog() {
        let catalog = parse_catalog(MINIMAL).unwrap();
        assert_eq!(catalog.current_stage.as_str(), "arrays");
        assert_eq!(catalog.stages[0].completed_lessons(), 1);

        let question = &catalog.lessons[0].question;
        assert_eq!(question.answers().len(), 2);
        assert!(question.hint().is_empty());
        assert!(!question.answers()[1].is_correct());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = parse_catalog("{ not json").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn blank_ids_fail_to_parse() {
        let raw = MINIMAL.replace("\"id\": \"q1\"", "\"id\": \"\"");
        assert!(matches!(
            parse_catalog(&raw),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn sample_document_survives_json() {
        let json = to_json(&crate::sample::demo_document().unwrap()).unwrap();
        let catalog = parse_catalog(&json).unwrap();
        assert_eq!(catalog, crate::sample::demo_catalog().unwrap());
    }
}
