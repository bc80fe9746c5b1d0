use crate::parser::StepValue;
use serde::Serialize;

/// A property value as far as phase extraction cares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// Defined-type wrapper around another value, e.g. `IFCLABEL('3')`.
    Wrapped(Box<RawValue>),
    Other,
}

impl From<&StepValue> for RawValue {
    fn from(value: &StepValue) -> Self {
        match value {
            StepValue::Real(f) => Self::Number(*f),
            StepValue::Integer(i) => Self::Number(*i as f64),
            StepValue::String(s) => Self::Text(s.clone()),
            StepValue::Typed(_, inner) => Self::Wrapped(Box::new(Self::from(inner.as_ref()))),
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyValue {
    /// `IfcPropertySingleValue`; `None` when the nominal value is unset.
    Single(Option<RawValue>),
    /// `IfcPropertyEnumeratedValue`
    Enumerated(Vec<RawValue>),
    /// `IfcPropertyListValue`
    List(Vec<RawValue>),
    /// Any other property kind (bounded, table, reference, complex).
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySet {
    pub name: String,
    pub properties: Vec<Property>,
}

impl PropertySet {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}
