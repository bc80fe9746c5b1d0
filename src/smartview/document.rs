use crate::smartview::compiler::{ViewLabel, ViewRules};
use crate::smartview::rule::CompiledRule;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use uuid::Uuid;

/// Title and description of the smartview set.
pub const DEFAULT_SET_TITLE: &str = "UC_Modellbasierte_Darstellung_Bauzustand";

/// Who compiled the document and when. One timestamp is shared by every
/// view of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub creator: String,
    pub timestamp: NaiveDateTime,
}

impl Provenance {
    /// The invoking user and the local time, to the second.
    #[must_use]
    pub fn current() -> Self {
        let now = Local::now().naive_local();
        Self {
            creator: current_user(),
            timestamp: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }
}

fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledView {
    pub label: ViewLabel,
    pub rules: Vec<CompiledRule>,
    pub guid: Uuid,
    pub creator: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledDocument {
    pub title: String,
    pub guid: Uuid,
    pub modified: NaiveDateTime,
    pub views: Vec<CompiledView>,
}

impl CompiledDocument {
    /// Attaches fresh random ids and the run's provenance to compiled views.
    #[must_use]
    pub fn new(views: Vec<ViewRules>, provenance: &Provenance) -> Self {
        Self::assemble(views, provenance, Uuid::new_v4)
    }

    /// Like [`CompiledDocument::new`] with ids drawn from `next_id`: first
    /// the set's id, then one per view in order.
    #[must_use]
    pub fn assemble<F: FnMut() -> Uuid>(
        views: Vec<ViewRules>,
        provenance: &Provenance,
        mut next_id: F,
    ) -> Self {
        let guid = next_id();
        let views = views
            .into_iter()
            .map(|view| CompiledView {
                label: view.label,
                rules: view.rules,
                guid: next_id(),
                creator: provenance.creator.clone(),
                timestamp: provenance.timestamp,
            })
            .collect();

        Self {
            title: DEFAULT_SET_TITLE.to_string(),
            guid,
            modified: provenance.timestamp,
            views,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.views.iter().map(|v| v.rules.len()).sum()
    }
}
