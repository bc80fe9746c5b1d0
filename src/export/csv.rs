use crate::error::ExportError;
use crate::model::PropertyCatalog;
use std::fs::File;
use std::path::Path;

/// Writes one row per property set / property pair, sorted by name.
pub fn export_csv<P: AsRef<Path>>(catalog: &PropertyCatalog, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Property Set", "Property"])?;

    for (property_set, property) in catalog.entries() {
        writer.write_record([property_set, property])?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
