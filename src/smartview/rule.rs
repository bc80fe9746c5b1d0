//! Rule vocabulary of BIMcollab ZOOM smartviews.

use crate::model::PropertyBinding;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Not yet built, or existing without a phase.
pub const LIGHT_GRAY: Rgba = Rgba(204, 204, 204, 255);
/// Built in an earlier phase.
pub const DARK_GRAY: Rgba = Rgba(85, 85, 85, 255);
/// Built in the current phase.
pub const RED: Rgba = Rgba(255, 0, 0, 255);
/// Demolished in the current phase.
pub const YELLOW: Rgba = Rgba(255, 249, 10, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionKind {
    Equals,
    NotEquals,
    Less,
    Greater,
}

impl ConditionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::Less => "Less",
            Self::Greater => "Greater",
        }
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Threshold {
    /// Phase property value 0: no construction or demolition phase assigned.
    Unset,
    Phase(f64),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("0.00000000000"),
            // Shortest round-trip form, always with a fraction: 1.0, 12.5
            Self::Phase(p) => write!(f, "{p:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Action {
    /// Continues into the next rule, which must match as well.
    And(Option<Rgba>),
    AddSetColored(Rgba),
    SetTransparent,
    Remove,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And(_) => "And...",
            Self::AddSetColored(_) => "AddSetColored",
            Self::SetTransparent => "SetTransparent",
            Self::Remove => "Remove",
        }
    }

    #[must_use]
    pub fn color(self) -> Option<Rgba> {
        match self {
            Self::And(color) => color,
            Self::AddSetColored(color) => Some(color),
            Self::SetTransparent | Self::Remove => None,
        }
    }
}

/// One smartview rule. The IFC type filter is always `Any` and the property
/// value type always `DoubleValue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledRule {
    pub binding: PropertyBinding,
    pub condition: ConditionKind,
    pub threshold: Threshold,
    pub action: Action,
}

impl CompiledRule {
    #[must_use]
    pub fn new(
        binding: &PropertyBinding,
        condition: ConditionKind,
        threshold: Threshold,
        action: Action,
    ) -> Self {
        Self {
            binding: binding.clone(),
            condition,
            threshold,
            action,
        }
    }
}
