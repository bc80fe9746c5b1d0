//! Export of the property catalog gathered by a [`Session`](crate::session::Session).

pub mod csv;
pub mod json;

pub use crate::error::ExportError;
pub use csv::export_csv;
pub use json::export_json;

use crate::model::PropertyCatalog;
use crate::parser::SchemaInfo;
use crate::session::Session;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct FileEntry<'a> {
    pub path: &'a Path,
    /// `None` when the file could not be loaded.
    pub schema: Option<&'a SchemaInfo>,
}

/// Files of a session with their schemas, plus the merged catalog.
#[derive(Debug, Serialize)]
pub struct CatalogReport<'a> {
    pub files: Vec<FileEntry<'a>>,
    pub property_sets: &'a PropertyCatalog,
}

impl<'a> CatalogReport<'a> {
    #[must_use]
    pub fn from_session(session: &'a Session) -> Self {
        let files = session
            .files()
            .iter()
            .map(|path| FileEntry {
                path,
                schema: session.schema(path),
            })
            .collect();
        Self {
            files,
            property_sets: session.catalog(),
        }
    }
}
