#![forbid(unsafe_code)]

pub mod catalog;
pub mod json;
pub mod repository;
pub mod sample;

pub use catalog::{Catalog, CatalogDocument, LessonDocument};
pub use repository::{ContentRepository, InMemoryContent, StorageError};
