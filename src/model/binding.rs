use crate::error::RunError;
use serde::Serialize;

/// Property set of the standard Swiss civil engineering attribution.
pub const STANDARD_PROPERTY_SET: &str = "CH_Ing_Uebergeordnet";
pub const STANDARD_CONSTRUCTION_PROPERTY: &str = "Bauphase";
pub const STANDARD_DEMOLITION_PROPERTY: &str = "Rueckbauphase";

/// Where a phase number lives: a property inside a named property set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyBinding {
    pub property_set: String,
    pub property: String,
}

impl PropertyBinding {
    #[must_use]
    pub fn new(property_set: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            property_set: property_set.into(),
            property: property.into(),
        }
    }
}

/// Property sets and property names chosen for the construction and
/// demolition roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingSelection {
    pub property_sets: Vec<String>,
    pub construction_properties: Vec<String>,
    pub demolition_properties: Vec<String>,
}

impl BindingSelection {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            property_sets: vec![STANDARD_PROPERTY_SET.to_string()],
            construction_properties: vec![STANDARD_CONSTRUCTION_PROPERTY.to_string()],
            demolition_properties: vec![STANDARD_DEMOLITION_PROPERTY.to_string()],
        }
    }

    /// Every list must name at least one entry.
    pub fn validate(&self) -> Result<(), RunError> {
        let missing = if self.property_sets.is_empty() {
            Some("property sets")
        } else if self.construction_properties.is_empty() {
            Some("construction properties")
        } else if self.demolition_properties.is_empty() {
            Some("demolition properties")
        } else {
            None
        };

        match missing {
            Some(missing) => Err(RunError::IncompleteSelection { missing }),
            None => Ok(()),
        }
    }

    /// Property sets × construction properties, in selection order.
    #[must_use]
    pub fn construction_bindings(&self) -> Vec<PropertyBinding> {
        self.bindings(&self.construction_properties)
    }

    /// Property sets × demolition properties, in selection order.
    #[must_use]
    pub fn demolition_bindings(&self) -> Vec<PropertyBinding> {
        self.bindings(&self.demolition_properties)
    }

    /// Names read during phase extraction: construction then demolition properties.
    #[must_use]
    pub fn phase_properties(&self) -> Vec<String> {
        self.construction_properties
            .iter()
            .chain(&self.demolition_properties)
            .cloned()
            .collect()
    }

    fn bindings(&self, properties: &[String]) -> Vec<PropertyBinding> {
        self.property_sets
            .iter()
            .flat_map(|pset| {
                properties
                    .iter()
                    .map(move |property| PropertyBinding::new(pset.clone(), property.clone()))
            })
            .collect()
    }
}

/// How the phase bindings of a run are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// `CH_Ing_Uebergeordnet` with `Bauphase` / `Rueckbauphase`.
    Standard,
    Custom(BindingSelection),
}

impl Attribution {
    /// The effective selection; custom selections must be complete.
    pub fn selection(&self) -> Result<BindingSelection, RunError> {
        match self {
            Self::Standard => Ok(BindingSelection::standard()),
            Self::Custom(selection) => {
                selection.validate()?;
                Ok(selection.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bindings_are_cartesian_in_selection_order() {
        let selection = BindingSelection {
            property_sets: vec!["A".into(), "B".into()],
            construction_properties: vec!["Bau1".into(), "Bau2".into()],
            demolition_properties: vec!["Rueck".into()],
        };

        assert_eq!(
            selection.construction_bindings(),
            vec![
                PropertyBinding::new("A", "Bau1"),
                PropertyBinding::new("A", "Bau2"),
                PropertyBinding::new("B", "Bau1"),
                PropertyBinding::new("B", "Bau2"),
            ]
        );
        assert_eq!(
            selection.demolition_bindings(),
            vec![PropertyBinding::new("A", "Rueck"), PropertyBinding::new("B", "Rueck")]
        );
        assert_eq!(selection.phase_properties(), vec!["Bau1", "Bau2", "Rueck"]);
    }

    #[test]
    fn standard_attribution_bypasses_selection() {
        let selection = Attribution::Standard.selection().unwrap();

        assert_eq!(
            selection.construction_bindings(),
            vec![PropertyBinding::new("CH_Ing_Uebergeordnet", "Bauphase")]
        );
        assert_eq!(
            selection.demolition_bindings(),
            vec![PropertyBinding::new("CH_Ing_Uebergeordnet", "Rueckbauphase")]
        );
    }

    #[test]
    fn incomplete_custom_selection_is_rejected() {
        let selection = BindingSelection {
            property_sets: vec!["A".into()],
            construction_properties: vec!["Bau".into()],
            demolition_properties: Vec::new(),
        };

        match Attribution::Custom(selection).selection() {
            Err(RunError::IncompleteSelection { missing }) => {
                assert_eq!(missing, "demolition properties");
            }
            other => panic!("expected incomplete selection, got {other:?}"),
        }
    }
}
