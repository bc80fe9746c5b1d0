//! A processing session: the files added so far, their schemas, and the
//! catalog of property sets discovered in them.

use crate::error::{ParseError, RunError};
use crate::model::{Attribution, BindingSelection, PropertyCatalog};
use crate::parser::ifc::display_name;
use crate::parser::{open_ifc_file, SchemaInfo, StepFile};
use crate::phase::{property_sets, PhaseCollector, PhaseTimeline, PsetFilter};
use crate::smartview::{compile, write_smartview, CompiledDocument, Provenance, FILE_EXTENSION};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// What a run should produce.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub output: Option<PathBuf>,
    pub attribution: Attribution,
    /// Smartview set title; the default title when `None`.
    pub title: Option<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub timeline: PhaseTimeline,
    pub views: usize,
    pub rules: usize,
}

#[derive(Debug, Default)]
pub struct Session {
    files: Vec<PathBuf>,
    schemas: HashMap<PathBuf, SchemaInfo>,
    catalog: PropertyCatalog,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn schema(&self, path: &Path) -> Option<&SchemaInfo> {
        self.schemas.get(path)
    }

    #[must_use]
    pub fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    /// Adds a file, detects its schema and records its property sets in the
    /// catalog. Files already in the session are ignored.
    ///
    /// A file that fails to load stays in the session; the run tries it again
    /// and skips it if it still fails.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> Result<(), ParseError> {
        let path = path.into();
        if self.files.contains(&path) {
            return Ok(());
        }
        self.files.push(path.clone());

        let model = open_ifc_file(&path).inspect_err(|e| {
            error!(file = %display_name(&path), error = %e, "failed to load file");
        })?;
        let schema = SchemaInfo::classify(model.schema.as_deref());
        info!(file = %display_name(&path), schema = %schema, "loaded IFC file");

        let (catalog, entities) = scan_catalog(&model, &schema);
        self.catalog.merge(catalog);
        info!(
            file = %display_name(&path),
            entities,
            property_sets = self.catalog.len(),
            "metadata loaded"
        );
        if self.catalog.is_empty() {
            warn!("no property sets found, check the IFC files");
        } else {
            let names: Vec<&str> = self.catalog.property_sets().collect();
            info!("property sets found: {}", names.join(", "));
        }

        self.schemas.insert(path, schema);
        Ok(())
    }

    /// Forgets all files, schemas and catalog entries.
    pub fn clear(&mut self) {
        self.files.clear();
        self.schemas.clear();
        self.catalog.clear();
        info!("file list cleared");
    }

    /// Validates the request, compiles the session's files and writes the
    /// smartview file. Nothing is written unless every step before the
    /// write succeeded.
    pub fn run(
        &self,
        request: &RunRequest,
        provenance: &Provenance,
    ) -> Result<RunSummary, RunError> {
        if self.files.is_empty() {
            return Err(RunError::NoFiles);
        }
        let output = request
            .output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .map(normalize_output)
            .ok_or(RunError::NoOutput)?;
        let selection = request.attribution.selection()?;

        let (timeline, mut document) = self.compile_document(&selection, provenance)?;
        if let Some(title) = &request.title {
            document = document.with_title(title.clone());
        }

        write_smartview(&document, &output)?;

        let phases: Vec<String> = timeline.phases().iter().map(f64::to_string).collect();
        info!(
            output = %output.display(),
            "done, processed phases: {}",
            phases.join(", ")
        );

        Ok(RunSummary {
            output,
            views: document.views.len(),
            rules: document.rule_count(),
            timeline,
        })
    }

    /// Scans every `.ifc` file of the session for phase tags and compiles
    /// the resulting timeline. Files that fail to open are logged and
    /// skipped.
    pub fn compile_document(
        &self,
        selection: &BindingSelection,
        provenance: &Provenance,
    ) -> Result<(PhaseTimeline, CompiledDocument), RunError> {
        let mut collector = PhaseCollector::new();

        for path in self.files.iter().filter(|p| has_ifc_extension(p)) {
            let model = match open_ifc_file(path) {
                Ok(model) => model,
                Err(e) => {
                    error!(file = %display_name(path), error = %e, "failed to read file");
                    continue;
                }
            };
            let schema = self
                .schemas
                .get(path)
                .cloned()
                .unwrap_or_else(|| SchemaInfo::classify(model.schema.as_deref()));
            info!(file = %display_name(path), schema = %schema, "processing file");

            let stats = collector.scan_model(&model, &schema, selection);
            info!(
                file = %display_name(path),
                entities = stats.entities,
                values = stats.values,
                skipped = stats.skipped,
                tags = stats.tags,
                failed_types = stats.failed_types,
                "phase properties read"
            );
        }

        let timeline = collector.finish()?;
        let views = compile(
            &timeline,
            &selection.construction_bindings(),
            &selection.demolition_bindings(),
        );
        Ok((timeline, CompiledDocument::new(views, provenance)))
    }
}

/// Property set catalog of one model, plus the number of entities visited.
fn scan_catalog(model: &StepFile, schema: &SchemaInfo) -> (PropertyCatalog, usize) {
    let mut catalog = PropertyCatalog::new();
    let mut entities = 0;

    for entity_type in schema.entity_type_universe() {
        let scanned: Result<(), ParseError> =
            model.by_type(entity_type).into_iter().try_for_each(|entity| {
                entities += 1;
                for pset in property_sets(model, entity, PsetFilter::all()) {
                    catalog.add(&pset?);
                }
                Ok(())
            });
        if let Err(e) = scanned {
            warn!(entity_type, error = %e, "could not process entity type");
        }
    }

    (catalog, entities)
}

fn has_ifc_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ifc"))
}

/// Appends `.bcsv` unless the path already ends with it.
fn normalize_output(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION));
    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(FILE_EXTENSION);
        PathBuf::from(name)
    }
}
