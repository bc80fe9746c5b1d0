use super::PropertySet;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Property set names and their property names discovered across the
/// files of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyCatalog {
    property_sets: BTreeMap<String, BTreeSet<String>>,
}

impl PropertyCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a property set. Unnamed sets and unnamed properties are skipped.
    pub fn add(&mut self, pset: &PropertySet) {
        if pset.name.is_empty() {
            return;
        }
        let properties = self.property_sets.entry(pset.name.clone()).or_default();
        properties.extend(
            pset.properties
                .iter()
                .filter(|p| !p.name.is_empty())
                .map(|p| p.name.clone()),
        );
    }

    pub fn merge(&mut self, other: PropertyCatalog) {
        for (pset, properties) in other.property_sets {
            self.property_sets.entry(pset).or_default().extend(properties);
        }
    }

    pub fn clear(&mut self) {
        self.property_sets.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.property_sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property_sets.is_empty()
    }

    /// Property set names in sorted order.
    pub fn property_sets(&self) -> impl Iterator<Item = &str> {
        self.property_sets.keys().map(String::as_str)
    }

    /// Sorted (property set, property) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.property_sets.iter().flat_map(|(pset, properties)| {
            properties
                .iter()
                .map(move |property| (pset.as_str(), property.as_str()))
        })
    }

    /// Union of the properties of the given property sets, sorted.
    #[must_use]
    pub fn properties_of<S: AsRef<str>>(&self, property_sets: &[S]) -> BTreeSet<&str> {
        property_sets
            .iter()
            .filter_map(|pset| self.property_sets.get(pset.as_ref()))
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Property, PropertyValue};
    use pretty_assertions::assert_eq;

    fn pset(name: &str, properties: &[&str]) -> PropertySet {
        PropertySet {
            name: name.to_string(),
            properties: properties
                .iter()
                .map(|p| Property {
                    name: (*p).to_string(),
                    value: PropertyValue::Single(None),
                })
                .collect(),
        }
    }

    #[test]
    fn collects_sorted_unique_names() {
        let mut catalog = PropertyCatalog::new();
        catalog.add(&pset("Pset_WallCommon", &["LoadBearing", "IsExternal"]));
        catalog.add(&pset("CH_Ing_Uebergeordnet", &["Rueckbauphase", "Bauphase"]));
        catalog.add(&pset("CH_Ing_Uebergeordnet", &["Bauphase", ""]));
        catalog.add(&pset("", &["Ignored"]));

        assert_eq!(
            catalog.property_sets().collect::<Vec<_>>(),
            vec!["CH_Ing_Uebergeordnet", "Pset_WallCommon"]
        );
        assert_eq!(
            catalog.properties_of(&["CH_Ing_Uebergeordnet"]).into_iter().collect::<Vec<_>>(),
            vec!["Bauphase", "Rueckbauphase"]
        );
        assert_eq!(catalog.entries().count(), 4);
    }

    #[test]
    fn merge_and_clear() {
        let mut first = PropertyCatalog::new();
        first.add(&pset("A", &["x"]));
        let mut second = PropertyCatalog::new();
        second.add(&pset("A", &["y"]));
        second.add(&pset("B", &["z"]));

        first.merge(second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.properties_of(&["A", "B"]).len(), 3);

        first.clear();
        assert!(first.is_empty());
    }
}
