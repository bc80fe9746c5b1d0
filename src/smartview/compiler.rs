//! Compiles a phase timeline into one rule sequence per phase.
//!
//! BIMcollab ZOOM evaluates a smartview's rules top to bottom: each rule adds
//! to, recolors or removes from the set built by the rules before it. The
//! emission order below is therefore part of the output contract.

use crate::model::PropertyBinding;
use crate::phase::PhaseTimeline;
use crate::smartview::rule::{
    Action, CompiledRule, ConditionKind, Threshold, DARK_GRAY, LIGHT_GRAY, RED, YELLOW,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ViewLabel {
    /// Existing condition, phase 0.
    Bestand,
    Phase(f64),
    /// Final condition, the last phase.
    Endzustand,
}

impl fmt::Display for ViewLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bestand => f.write_str("Bestand"),
            Self::Endzustand => f.write_str("Endzustand"),
            Self::Phase(p) => write!(f, "{p}"),
        }
    }
}

/// Rules of one view before ids and provenance are attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRules {
    pub label: ViewLabel,
    pub phase: f64,
    pub rules: Vec<CompiledRule>,
}

/// Label of the phase at `index`: `Bestand` for phase 0 at the start,
/// `Endzustand` for the last phase, otherwise the phase number.
#[must_use]
pub fn view_label(phases: &[f64], index: usize) -> ViewLabel {
    let phase = phases[index];
    if index == 0 && phase == 0.0 {
        ViewLabel::Bestand
    } else if index + 1 == phases.len() {
        ViewLabel::Endzustand
    } else {
        ViewLabel::Phase(phase)
    }
}

/// One view per timeline entry, in timeline order.
#[must_use]
pub fn compile(
    timeline: &PhaseTimeline,
    construction: &[PropertyBinding],
    demolition: &[PropertyBinding],
) -> Vec<ViewRules> {
    let phases = timeline.phases();
    (0..phases.len())
        .map(|index| {
            let label = view_label(phases, index);
            let phase = phases[index];
            let rules = match label {
                ViewLabel::Bestand => existing_condition_rules(construction),
                ViewLabel::Phase(_) | ViewLabel::Endzustand => {
                    phase_rules(phase, construction, demolition)
                }
            };
            ViewRules {
                label,
                phase,
                rules,
            }
        })
        .collect()
}

/// Everything with construction phase 0 exists already: light gray.
fn existing_condition_rules(construction: &[PropertyBinding]) -> Vec<CompiledRule> {
    construction
        .iter()
        .map(|binding| {
            CompiledRule::new(
                binding,
                ConditionKind::Equals,
                Threshold::Phase(0.0),
                Action::AddSetColored(LIGHT_GRAY),
            )
        })
        .collect()
}

fn phase_rules(
    phase: f64,
    construction: &[PropertyBinding],
    demolition: &[PropertyBinding],
) -> Vec<CompiledRule> {
    use ConditionKind::{Equals, Greater, Less, NotEquals};

    let current = Threshold::Phase(phase);
    let mut rules = Vec::with_capacity(
        4 * construction.len() * demolition.len() + 3 * construction.len() + 4 * demolition.len(),
    );

    // Elements without a construction phase that are not demolished yet:
    // never demolished, or demolished in a later phase.
    for build in construction {
        for demolish in demolition {
            rules.push(CompiledRule::new(
                build,
                Equals,
                Threshold::Unset,
                Action::And(Some(LIGHT_GRAY)),
            ));
            rules.push(CompiledRule::new(
                demolish,
                Equals,
                Threshold::Unset,
                Action::AddSetColored(LIGHT_GRAY),
            ));
            rules.push(CompiledRule::new(
                build,
                Equals,
                Threshold::Unset,
                Action::And(Some(LIGHT_GRAY)),
            ));
            rules.push(CompiledRule::new(
                demolish,
                Greater,
                current,
                Action::AddSetColored(LIGHT_GRAY),
            ));
        }
    }

    // Built earlier (dark gray), built now (red).
    for build in construction {
        rules.push(CompiledRule::new(build, Less, current, Action::And(None)));
        rules.push(CompiledRule::new(
            build,
            Greater,
            Threshold::Unset,
            Action::AddSetColored(DARK_GRAY),
        ));
        rules.push(CompiledRule::new(
            build,
            Equals,
            current,
            Action::AddSetColored(RED),
        ));
    }

    // Demolished now (yellow, transparent), demolished earlier (hidden).
    for demolish in demolition {
        rules.push(CompiledRule::new(
            demolish,
            Equals,
            current,
            Action::AddSetColored(YELLOW),
        ));
        rules.push(CompiledRule::new(
            demolish,
            Equals,
            current,
            Action::SetTransparent,
        ));
        rules.push(CompiledRule::new(demolish, Less, current, Action::And(None)));
        rules.push(CompiledRule::new(
            demolish,
            NotEquals,
            Threshold::Unset,
            Action::Remove,
        ));
    }

    rules
}
