use crate::error::{ParseError, RunError};
use crate::model::BindingSelection;
use crate::parser::{SchemaInfo, StepFile};
use crate::phase::coerce::{phase_tags, MAX_PHASE};
use crate::phase::walker::{property_sets, PsetFilter};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Distinct phase tags in ascending order.
///
/// When at least two distinct tags were observed, one more phase
/// (`max + 1`) closes the timeline and stands for the final state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTimeline {
    phases: Vec<f64>,
    terminal: bool,
}

impl PhaseTimeline {
    /// Builds a timeline from observed tags. Returns `None` without tags.
    ///
    /// Tags that are not finite or reach [`MAX_PHASE`] in magnitude are
    /// ignored, so `max + 1` is always a new phase.
    #[must_use]
    pub fn from_tags<I: IntoIterator<Item = f64>>(tags: I) -> Option<Self> {
        let mut phases: Vec<f64> = tags
            .into_iter()
            .filter(|t| t.is_finite() && t.abs() < MAX_PHASE)
            .collect();
        if phases.is_empty() {
            return None;
        }
        phases.sort_by(f64::total_cmp);
        phases.dedup();

        let terminal = phases.len() >= 2;
        if terminal {
            let last = phases[phases.len() - 1];
            phases.push(last + 1.0);
        }

        Some(Self { phases, terminal })
    }

    #[must_use]
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Whether the last phase is the synthetic final state.
    #[must_use]
    pub fn has_terminal(&self) -> bool {
        self.terminal
    }
}

impl fmt::Display for PhaseTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phases: Vec<String> = self.phases.iter().map(f64::to_string).collect();
        write!(f, "[{}]", phases.join(", "))
    }
}

/// Counts reported after scanning one model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub entities: usize,
    /// Matching properties that were read.
    pub values: usize,
    /// Matching properties without a readable phase number.
    pub skipped: usize,
    pub tags: usize,
    pub failed_types: usize,
}

/// Accumulates phase tags over all files of a run.
#[derive(Debug, Default)]
pub struct PhaseCollector {
    tags: Vec<f64>,
}

impl PhaseCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the phase tags of every entity in the model's entity type
    /// universe, read from the selected property sets and properties.
    ///
    /// A failure while scanning one entity type is logged and the remaining
    /// types are still scanned.
    pub fn scan_model(
        &mut self,
        model: &StepFile,
        schema: &SchemaInfo,
        selection: &BindingSelection,
    ) -> ScanStats {
        let properties = selection.phase_properties();
        let filter = PsetFilter::only(&selection.property_sets);
        let mut stats = ScanStats::default();

        for entity_type in schema.entity_type_universe() {
            if let Err(e) = self.scan_entity_type(model, entity_type, filter, &properties, &mut stats)
            {
                warn!(entity_type, error = %e, "could not process entity type");
                stats.failed_types += 1;
            }
        }

        stats
    }

    fn scan_entity_type(
        &mut self,
        model: &StepFile,
        entity_type: &str,
        filter: PsetFilter<'_>,
        properties: &[String],
        stats: &mut ScanStats,
    ) -> Result<(), ParseError> {
        for entity in model.by_type(entity_type) {
            stats.entities += 1;
            for pset in property_sets(model, entity, filter) {
                let pset = pset?;
                for property in &pset.properties {
                    if !properties.is_empty() && !properties.contains(&property.name) {
                        continue;
                    }
                    stats.values += 1;
                    let tags = phase_tags(&property.value);
                    if tags.is_empty() {
                        stats.skipped += 1;
                    }
                    stats.tags += tags.len();
                    self.tags.extend(tags);
                }
            }
        }
        Ok(())
    }

    /// Reduces the collected tags to a timeline.
    pub fn finish(self) -> Result<PhaseTimeline, RunError> {
        let timeline = PhaseTimeline::from_tags(self.tags).ok_or(RunError::NoPhasesFound)?;
        info!(phases = %timeline, "phases found");
        Ok(timeline)
    }
}
