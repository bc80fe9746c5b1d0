//! Schema generation detection and the entity types scanned per generation.

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Supertypes scanned in every model.
const BASE_ENTITY_TYPES: &[&str] = &[
    "IfcObjectDefinition",
    "IfcBuildingElement",
    "IfcElement",
    "IfcObject",
    "IfcProduct",
];

const IFC4X3_ENTITY_TYPES: &[&str] = &[
    "IfcBuiltElement",
    "IfcElementAssembly",
    "IfcElementComponent",
    "IfcInfrastructureElement",
    "IfcCivilElement",
    "IfcFacility",
];

const IFC4_ENTITY_TYPES: &[&str] = &["IfcElementAssembly", "IfcElementComponent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaGeneration {
    Ifc2x3,
    Ifc4,
    Ifc4x3,
    Unknown,
}

impl SchemaGeneration {
    /// IFC4X3 identifiers also start with `IFC4`, so they are checked first.
    #[must_use]
    pub fn from_identifier(schema: &str) -> Self {
        if schema.contains("IFC4X3") || schema.contains("IFC4x3") {
            Self::Ifc4x3
        } else if schema.starts_with("IFC4") {
            Self::Ifc4
        } else if schema.starts_with("IFC2X3") {
            Self::Ifc2x3
        } else {
            Self::Unknown
        }
    }

    /// Entity types added on top of the base list for this generation.
    #[must_use]
    pub fn extension_types(self) -> &'static [&'static str] {
        match self {
            Self::Ifc4x3 => IFC4X3_ENTITY_TYPES,
            Self::Ifc4 => IFC4_ENTITY_TYPES,
            Self::Ifc2x3 | Self::Unknown => &[],
        }
    }
}

/// Schema identification of one opened model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaInfo {
    pub schema: String,
    pub generation: SchemaGeneration,
}

impl SchemaInfo {
    /// Classifies the declared identifier. A model without a readable
    /// identifier is reported as unknown and scanned with the base types only.
    #[must_use]
    pub fn classify(identifier: Option<&str>) -> Self {
        match identifier.map(str::trim).filter(|s| !s.is_empty()) {
            Some(schema) => Self {
                schema: schema.to_string(),
                generation: SchemaGeneration::from_identifier(schema),
            },
            None => {
                warn!("schema detection failed: no FILE_SCHEMA identifier");
                Self::unknown()
            }
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            schema: "UNKNOWN".to_string(),
            generation: SchemaGeneration::Unknown,
        }
    }

    #[must_use]
    pub fn is_ifc2x3(&self) -> bool {
        self.generation == SchemaGeneration::Ifc2x3
    }

    #[must_use]
    pub fn is_ifc4(&self) -> bool {
        self.generation == SchemaGeneration::Ifc4
    }

    #[must_use]
    pub fn is_ifc4x3(&self) -> bool {
        self.generation == SchemaGeneration::Ifc4x3
    }

    /// Entity types whose instances are scanned for property sets.
    #[must_use]
    pub fn entity_type_universe(&self) -> Vec<&'static str> {
        BASE_ENTITY_TYPES
            .iter()
            .chain(self.generation.extension_types())
            .copied()
            .collect()
    }
}

impl fmt::Display for SchemaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.schema)
    }
}
