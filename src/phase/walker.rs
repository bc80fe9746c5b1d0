//! Property sets reachable from an entity through its defining relationships.

use crate::error::ParseError;
use crate::model::{Property, PropertySet, PropertyValue, RawValue};
use crate::parser::{StepEntity, StepFile, StepValue};

/// Allow-list of property set names. An empty list admits every set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsetFilter<'a> {
    names: &'a [String],
}

impl<'a> PsetFilter<'a> {
    #[must_use]
    pub fn all() -> Self {
        Self { names: &[] }
    }

    #[must_use]
    pub fn only(names: &'a [String]) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }
}

/// Walks the property sets bound to `entity`, both directly through
/// `IfcRelDefinesByProperties` and through the `HasPropertySets` of the
/// type assigned by `IfcRelDefinesByType`.
///
/// Only `IfcPropertySet` definitions are yielded; quantity sets and other
/// property definitions are passed over. An entity without relationships
/// yields nothing. A reference to a missing instance yields
/// [`ParseError::DanglingReference`] and the walk carries on with the next
/// definition.
///
/// The walk is lazy and single-use: call this again for a fresh pass.
#[must_use]
pub fn property_sets<'a>(
    model: &'a StepFile,
    entity: &StepEntity,
    filter: PsetFilter<'a>,
) -> PropertySets<'a> {
    PropertySets {
        model,
        entity_id: entity.id,
        relations: model.is_defined_by(entity.id).iter(),
        pending: Vec::new().into_iter(),
        pending_from: entity.id,
        filter,
    }
}

pub struct PropertySets<'a> {
    model: &'a StepFile,
    entity_id: u64,
    relations: std::slice::Iter<'a, u64>,
    pending: std::vec::IntoIter<u64>,
    pending_from: u64,
    filter: PsetFilter<'a>,
}

impl<'a> PropertySets<'a> {
    /// Property definition ids hanging off one relationship.
    fn definitions_of(&mut self, rel_id: u64) -> Result<Vec<u64>, ParseError> {
        let model = self.model;
        let rel = lookup(model, self.entity_id, rel_id)?;

        if rel.is_a("IFCRELDEFINESBYPROPERTIES") {
            // Index 5 = RelatingPropertyDefinition (a set of them in IFC4)
            self.pending_from = rel_id;
            return Ok(rel.get_refs(5));
        }

        if rel.is_a("IFCRELDEFINESBYTYPE") {
            // Index 5 = RelatingType
            let Some(type_id) = rel.get_ref(5) else {
                return Ok(Vec::new());
            };
            let type_object: &'a StepEntity = lookup(model, rel_id, type_id)?;
            // Index 5 = HasPropertySets
            self.pending_from = type_id;
            return Ok(type_object.get_refs(5));
        }

        Ok(Vec::new())
    }
}

fn lookup(model: &StepFile, from: u64, target: u64) -> Result<&StepEntity, ParseError> {
    model
        .get_entity(target)
        .ok_or(ParseError::DanglingReference { from, target })
}

impl Iterator for PropertySets<'_> {
    type Item = Result<PropertySet, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pset_id) = self.pending.next() {
                let pset = match lookup(self.model, self.pending_from, pset_id) {
                    Ok(pset) => pset,
                    Err(e) => return Some(Err(e)),
                };
                if !pset.is_a("IFCPROPERTYSET") {
                    continue;
                }
                if !self.filter.allows(pset.get_string(2).unwrap_or_default()) {
                    continue;
                }
                return Some(read_property_set(self.model, pset));
            }

            let rel_id = *self.relations.next()?;
            match self.definitions_of(rel_id) {
                Ok(ids) => self.pending = ids.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn read_property_set(model: &StepFile, pset: &StepEntity) -> Result<PropertySet, ParseError> {
    // Index 2 = Name, index 4 = HasProperties
    let name = pset.get_string(2).unwrap_or_default().to_string();

    let properties = pset
        .get_refs(4)
        .into_iter()
        .map(|prop_id| {
            model
                .get_entity(prop_id)
                .map(read_property)
                .ok_or(ParseError::DanglingReference {
                    from: pset.id,
                    target: prop_id,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PropertySet { name, properties })
}

fn read_property(prop: &StepEntity) -> Property {
    // Index 0 = Name, index 2 = NominalValue / EnumerationValues / ListValues
    let name = prop.get_string(0).unwrap_or_default().to_string();

    let value = match prop.entity_type.as_str() {
        "IFCPROPERTYSINGLEVALUE" => PropertyValue::Single(match prop.get(2) {
            None | Some(StepValue::Null) => None,
            Some(v) => Some(RawValue::from(v)),
        }),
        "IFCPROPERTYENUMERATEDVALUE" => PropertyValue::Enumerated(raw_list(prop.get(2))),
        "IFCPROPERTYLISTVALUE" => PropertyValue::List(raw_list(prop.get(2))),
        _ => PropertyValue::Unsupported,
    };

    Property { name, value }
}

fn raw_list(value: Option<&StepValue>) -> Vec<RawValue> {
    match value {
        Some(StepValue::List(items)) => items.iter().map(RawValue::from).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MODEL: &str = "ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCWALL('w1',$,'Wand',$,$,$,$,$,$);
#2=IFCPROPERTYSINGLEVALUE('Bauphase',$,IFCINTEGER(2),$);
#3=IFCPROPERTYSET('p1',$,'CH_Ing_Uebergeordnet',$,(#2));
#4=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#1),#3);
#5=IFCELEMENTQUANTITY('q1',$,'Qto_WallBaseQuantities',$,$,());
#6=IFCRELDEFINESBYPROPERTIES('r2',$,$,$,(#1),#5);
#7=IFCPROPERTYENUMERATEDVALUE('Rueckbauphase',$,(IFCLABEL('3'),IFCLABEL('4')),$);
#8=IFCPROPERTYSET('p2',$,'Pset_Typ',$,(#7));
#9=IFCWALLTYPE('t1',$,'Typ',$,$,(#8),$,$,$,.STANDARD.);
#10=IFCRELDEFINESBYTYPE('r3',$,$,$,(#1),#9);
#11=IFCSLAB('s1',$,'Decke',$,$,$,$,$,$,$);
#12=IFCBEAM('b1',$,'Balken',$,$,$,$,$,$,$);
#13=IFCRELDEFINESBYPROPERTIES('r4',$,$,$,(#12),#99);
ENDSEC;
END-ISO-10303-21;
";

    fn model() -> StepFile {
        StepFile::parse(MODEL).unwrap()
    }

    #[test]
    fn yields_direct_and_type_property_sets() {
        let model = model();
        let wall = model.get_entity(1).unwrap();

        let names: Vec<String> = property_sets(&model, wall, PsetFilter::all())
            .map(|p| p.unwrap().name)
            .collect();
        assert_eq!(names, vec!["CH_Ing_Uebergeordnet", "Pset_Typ"]);
    }

    #[test]
    fn reads_property_values() {
        let model = model();
        let wall = model.get_entity(1).unwrap();

        let psets: Vec<PropertySet> = property_sets(&model, wall, PsetFilter::all())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            psets[0].property("Bauphase").unwrap().value,
            PropertyValue::Single(Some(RawValue::Wrapped(Box::new(RawValue::Number(2.0)))))
        );
        assert_eq!(
            psets[1].property("Rueckbauphase").unwrap().value,
            PropertyValue::Enumerated(vec![
                RawValue::Wrapped(Box::new(RawValue::Text("3".to_string()))),
                RawValue::Wrapped(Box::new(RawValue::Text("4".to_string()))),
            ])
        );
    }

    #[test]
    fn filter_restricts_property_sets() {
        let model = model();
        let wall = model.get_entity(1).unwrap();
        let wanted = vec!["Pset_Typ".to_string()];

        let names: Vec<String> = property_sets(&model, wall, PsetFilter::only(&wanted))
            .map(|p| p.unwrap().name)
            .collect();
        assert_eq!(names, vec!["Pset_Typ"]);
    }

    #[test]
    fn entity_without_relationships_yields_nothing() {
        let model = model();
        let slab = model.get_entity(11).unwrap();

        assert_eq!(property_sets(&model, slab, PsetFilter::all()).count(), 0);
    }

    #[test]
    fn dangling_definition_is_reported() {
        let model = model();
        let beam = model.get_entity(12).unwrap();

        let results: Vec<_> = property_sets(&model, beam, PsetFilter::all()).collect();
        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(ParseError::DanglingReference { from, target }) => {
                assert_eq!((*from, *target), (13, 99));
            }
            other => panic!("expected dangling reference, got {other:?}"),
        }
    }
}
