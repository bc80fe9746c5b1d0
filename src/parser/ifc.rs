use crate::error::ParseError;
use crate::parser::step::StepFile;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Identifier substituted when a newer IFC4X3 release is rejected.
const FALLBACK_SCHEMA: &str = "IFC4";

/// Opens an IFC file, retrying once with a rewritten schema identifier.
///
/// When the reader rejects an IFC4X3 pre-release identifier (for example
/// `IFC4X3_RC4`), the file is copied to a temporary location with that
/// identifier replaced by `IFC4` and opened again. The temporary copy is
/// removed afterwards. If the retry fails too, the original error is
/// returned.
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::UnsupportedSchema`] if the schema is rejected and
/// the fallback does not help.
/// Returns [`ParseError::InvalidStep`] if the STEP format is malformed.
///
/// # Example
///
/// ```no_run
/// use ifc_bauzustand::parser::open_ifc_file;
///
/// let model = open_ifc_file("model.ifc")?;
/// println!("Schema: {:?}", model.schema);
/// # Ok::<(), ifc_bauzustand::error::ParseError>(())
/// ```
pub fn open_ifc_file<P: AsRef<Path>>(path: P) -> Result<StepFile, ParseError> {
    let path = path.as_ref();
    match read_ifc_file(path) {
        Err(ParseError::UnsupportedSchema { schema }) if schema.to_ascii_uppercase().contains("IFC4X3") => {
            warn!(
                file = %display_name(path),
                schema = %schema,
                "unsupported schema, trying schema fallback"
            );
            match open_with_rewritten_schema(path, &schema) {
                Ok(model) => {
                    info!(file = %display_name(path), "opened with schema fallback");
                    Ok(model)
                }
                Err(fallback_error) => {
                    warn!(
                        file = %display_name(path),
                        error = %fallback_error,
                        "schema fallback failed"
                    );
                    Err(ParseError::UnsupportedSchema { schema })
                }
            }
        }
        other => other,
    }
}

fn read_ifc_file(path: &Path) -> Result<StepFile, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    // Exporters occasionally write ISO 8859-1 outside of STEP escapes.
    let content = String::from_utf8_lossy(&bytes);
    StepFile::parse(&content)
}

fn open_with_rewritten_schema(path: &Path, schema: &str) -> Result<StepFile, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rewritten = String::from_utf8_lossy(&bytes).replace(schema, FALLBACK_SCHEMA);
    info!(
        file = %display_name(path),
        "schema fallback: {schema} -> {FALLBACK_SCHEMA}"
    );

    let mut temp = tempfile::Builder::new()
        .prefix("ifc-bauzustand-")
        .suffix(".ifc")
        .tempfile()
        .map_err(|source| ParseError::FileRead {
            path: std::env::temp_dir(),
            source,
        })?;
    let written = temp.write_all(rewritten.as_bytes());
    if let Err(source) = written.and_then(|()| temp.flush()) {
        return Err(ParseError::FileRead {
            path: temp.path().to_path_buf(),
            source,
        });
    }

    // The temporary copy is deleted when `temp` drops.
    read_ifc_file(temp.path())
}

/// File name for log lines, falling back to the full path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
