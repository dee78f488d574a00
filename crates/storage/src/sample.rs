//! Bundled demo content: three complexity questions across five stages.

use crate::catalog::{Catalog, CatalogDocument};
use crate::repository::{InMemoryContent, StorageError};

const DEMO_CATALOG_JSON: &str = include_str!("../data/demo_catalog.json");

/// The raw bundled catalog document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the bundled JSON is malformed.
pub fn demo_document() -> Result<CatalogDocument, StorageError> {
    Ok(serde_json::from_str(DEMO_CATALOG_JSON)?)
}

/// The bundled catalog, validated.
///
/// # Errors
///
/// Returns `StorageError` if the bundled content fails validation.
pub fn demo_catalog() -> Result<Catalog, StorageError> {
    demo_document()?.into_catalog()
}

/// # Errors
///
/// See `demo_catalog`.
pub fn demo_content() -> Result<InMemoryContent, StorageError> {
    demo_catalog().map(InMemoryContent::new)
}

/// Pretty JSON of the bundled catalog, for use as a starting template.
#[must_use]
pub fn demo_json() -> &'static str {
    DEMO_CATALOG_JSON
}
