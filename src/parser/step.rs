use std::collections::HashMap;

use crate::error::ParseError;
use crate::parser::hierarchy;
use crate::parser::schema::SchemaGeneration;

/// Schema identifiers the reader opens without a fallback.
const ACCEPTED_SCHEMAS: &[&str] = &[
    "IFC2X3",
    "IFC4",
    "IFC4X3",
    "IFC4X3_ADD1",
    "IFC4X3_ADD2",
    "IFC4X3_TC1",
];

/// Relationships whose `RelatedObjects` (index 4) make up the `IsDefinedBy` inverse.
const DEFINING_RELATIONS: &[&str] = &["IFCRELDEFINESBYPROPERTIES", "IFCRELDEFINESBYTYPE"];

/// Supertypes every related object of a defining relationship belongs to.
const OBJECT_ROOTS: &[&str] = &["IFCOBJECTDEFINITION", "IFCOBJECT", "IFCPRODUCT"];

#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    /// Defined-type wrapper such as `IFCLABEL('3')` or `IFCREAL(2.5)`.
    Typed(String, Box<StepValue>),
    Null,
    Derived,
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

impl StepEntity {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StepValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn get_string(&self, index: usize) -> Option<&str> {
        match self.values.get(index)? {
            StepValue::String(s) => Some(s),
            StepValue::Typed(_, inner) => match inner.as_ref() {
                StepValue::String(s) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn get_ref(&self, index: usize) -> Option<u64> {
        match self.values.get(index)? {
            StepValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// References held at `index`, either a single reference or a list of them.
    /// `$` and missing attributes give an empty list.
    #[must_use]
    pub fn get_refs(&self, index: usize) -> Vec<u64> {
        match self.values.get(index) {
            Some(StepValue::Reference(id)) => vec![*id],
            Some(StepValue::List(list)) => list
                .iter()
                .filter_map(|item| match item {
                    StepValue::Reference(id) => Some(*id),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_a(&self, entity_type: &str) -> bool {
        self.entity_type.eq_ignore_ascii_case(entity_type)
    }
}

#[derive(Debug)]
pub struct StepFile {
    pub entities: HashMap<u64, StepEntity>,
    /// `FILE_SCHEMA` identifier, if the header declares one.
    pub schema: Option<String>,
    type_index: HashMap<String, Vec<u64>>,
    defined_by: HashMap<u64, Vec<u64>>,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut entities = HashMap::new();
        let mut schema = None;
        let mut in_data = false;
        let mut saw_data = false;

        for statement in split_statements(content) {
            if statement.starts_with("FILE_SCHEMA") {
                // An unreadable declaration leaves the schema unknown.
                if let Some(declared) = first_quoted(&statement) {
                    if !is_accepted_schema(&declared) {
                        return Err(ParseError::UnsupportedSchema { schema: declared });
                    }
                    schema = Some(declared);
                }
                continue;
            }

            match statement.as_str() {
                "DATA" => {
                    in_data = true;
                    saw_data = true;
                }
                "ENDSEC" => in_data = false,
                _ if in_data && statement.starts_with('#') => {
                    if let Some(entity) = Self::parse_entity(&statement) {
                        entities.insert(entity.id, entity);
                    }
                }
                _ => {}
            }
        }

        if !saw_data {
            return Err(ParseError::InvalidStep {
                message: "missing DATA section".to_string(),
            });
        }

        let mut type_index: HashMap<String, Vec<u64>> = HashMap::new();
        for entity in entities.values() {
            type_index
                .entry(entity.entity_type.clone())
                .or_default()
                .push(entity.id);
        }
        for ids in type_index.values_mut() {
            ids.sort_unstable();
        }

        let mut defined_by: HashMap<u64, Vec<u64>> = HashMap::new();
        for relation_type in DEFINING_RELATIONS {
            for rel_id in type_index.get(*relation_type).into_iter().flatten() {
                // Index 4 = RelatedObjects
                for object_id in entities[rel_id].get_refs(4) {
                    defined_by.entry(object_id).or_default().push(*rel_id);
                }
            }
        }
        for rels in defined_by.values_mut() {
            rels.sort_unstable();
        }

        Ok(StepFile {
            entities,
            schema,
            type_index,
            defined_by,
        })
    }

    fn parse_entity(statement: &str) -> Option<StepEntity> {
        // Format: #123=IFCWALL('guid',#ref,'name',...)
        let eq_pos = statement.find('=')?;
        let id: u64 = statement[1..eq_pos].trim().parse().ok()?;

        let rest = statement[eq_pos + 1..].trim();
        let paren_pos = rest.find('(')?;
        let close_pos = rest.rfind(')')?;
        if close_pos < paren_pos {
            return None;
        }
        let entity_type = rest[..paren_pos].trim().to_ascii_uppercase();

        let values = Self::parse_values(&rest[paren_pos + 1..close_pos]);

        Some(StepEntity {
            id,
            entity_type,
            values,
        })
    }

    fn parse_values(s: &str) -> Vec<StepValue> {
        let mut values = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut paren_depth = 0;

        for ch in s.chars() {
            match ch {
                '\'' => {
                    in_string = !in_string;
                    current.push(ch);
                }
                '(' if !in_string => {
                    paren_depth += 1;
                    current.push(ch);
                }
                ')' if !in_string => {
                    paren_depth -= 1;
                    current.push(ch);
                }
                ',' if !in_string && paren_depth == 0 => {
                    values.push(Self::parse_single_value(current.trim()));
                    current.clear();
                }
                _ => current.push(ch),
            }
        }

        if !current.trim().is_empty() {
            values.push(Self::parse_single_value(current.trim()));
        }

        values
    }

    fn parse_single_value(s: &str) -> StepValue {
        let s = s.trim();

        if s == "$" {
            return StepValue::Null;
        }
        if s == "*" {
            return StepValue::Derived;
        }
        if let Some(stripped) = s.strip_prefix('#') {
            if let Ok(id) = stripped.parse::<u64>() {
                return StepValue::Reference(id);
            }
        }
        if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
            let raw = &s[1..s.len() - 1];
            return StepValue::String(decode_step_string(raw));
        }
        if s.len() >= 2 && s.starts_with('.') && s.ends_with('.') {
            let inner = &s[1..s.len() - 1];
            if inner == "T" {
                return StepValue::Boolean(true);
            }
            if inner == "F" {
                return StepValue::Boolean(false);
            }
            return StepValue::Enum(inner.to_string());
        }
        if s.starts_with('(') && s.ends_with(')') {
            let inner = &s[1..s.len() - 1];
            return StepValue::List(Self::parse_values(inner));
        }
        if let Ok(i) = s.parse::<i64>() {
            return StepValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return StepValue::Real(f);
        }
        // Typed value like IFCLABEL('3') or IFCBOOLEAN(.T.)
        if let Some(paren_pos) = s.find('(') {
            let type_name = s[..paren_pos].trim();
            if s.ends_with(')')
                && !type_name.is_empty()
                && type_name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                let inner = &s[paren_pos + 1..s.len() - 1];
                return StepValue::Typed(
                    type_name.to_ascii_uppercase(),
                    Box::new(Self::parse_single_value(inner)),
                );
            }
        }

        StepValue::String(s.to_string())
    }

    #[must_use]
    pub fn get_entity(&self, id: u64) -> Option<&StepEntity> {
        self.entities.get(&id)
    }

    /// Generation derived from the declared schema identifier.
    #[must_use]
    pub fn generation(&self) -> SchemaGeneration {
        self.schema
            .as_deref()
            .map_or(SchemaGeneration::Unknown, SchemaGeneration::from_identifier)
    }

    /// All instances of `entity_type` or any of its subtypes, ordered by id.
    ///
    /// Names are matched case-insensitively. A name the reader does not know
    /// returns an empty list.
    #[must_use]
    pub fn by_type(&self, entity_type: &str) -> Vec<&StepEntity> {
        let wanted = entity_type.to_ascii_uppercase();
        let generation = self.generation();

        let mut ids: Vec<u64> = self
            .type_index
            .iter()
            .filter(|(name, _)| hierarchy::is_subtype_of(name, &wanted, generation))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        // Related objects of a defining relationship are objects whatever
        // their type; types missing from the table still count.
        if OBJECT_ROOTS.contains(&wanted.as_str()) {
            ids.extend(self.defined_by.keys().copied().filter(|id| {
                self.entities
                    .get(id)
                    .is_some_and(|e| !hierarchy::is_known(&e.entity_type, generation))
            }));
        }
        ids.sort_unstable();
        ids.dedup();

        ids.iter().filter_map(|id| self.entities.get(id)).collect()
    }

    /// Ids of the `IfcRelDefinesByProperties` / `IfcRelDefinesByType`
    /// relationships that list `entity_id` among their related objects.
    #[must_use]
    pub fn is_defined_by(&self, entity_id: u64) -> &[u64] {
        self.defined_by
            .get(&entity_id)
            .map_or(&[][..], Vec::as_slice)
    }
}

fn is_accepted_schema(identifier: &str) -> bool {
    ACCEPTED_SCHEMAS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(identifier))
}

fn first_quoted(statement: &str) -> Option<String> {
    let start = statement.find('\'')? + 1;
    let len = statement[start..].find('\'')?;
    Some(statement[start..start + len].trim().to_string())
}

/// Splits STEP text into `;`-terminated statements, skipping `/* */` comments.
/// Line breaks inside a statement are folded into spaces.
fn split_statements(content: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            '/' if !in_string && chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            ';' if !in_string => {
                let statement = current.trim();
                if !statement.is_empty() {
                    statements.push(statement.to_string());
                }
                current.clear();
            }
            '\r' | '\n' if !in_string => current.push(' '),
            _ => current.push(ch),
        }
    }

    statements
}

/// Decode STEP/IFC encoded strings with Unicode escape sequences.
/// Supports:
/// - `\X2\XXXX\X0\` - 2-byte Unicode (BMP), can have multiple 4-char hex codes
/// - `\X\XX` - 1-byte ISO 8859-1
/// - `\S\X` - ISO 8859-1 high half
/// - `\\` - escaped backslash
/// - `''` - escaped apostrophe
fn decode_step_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('X') => {
                    chars.next(); // consume 'X'
                    match chars.peek() {
                        Some('2') => {
                            chars.next(); // consume '2'
                            chars.next(); // consume '\'

                            let mut hex = String::new();
                            while let Some(&c) = chars.peek() {
                                if c == '\\' {
                                    break;
                                }
                                hex.push(c);
                                chars.next();
                            }
                            // Skip \X0\
                            if chars.peek() == Some(&'\\') {
                                for _ in 0..4 {
                                    chars.next();
                                }
                            }
                            for chunk in hex.as_bytes().chunks(4) {
                                let decoded = std::str::from_utf8(chunk)
                                    .ok()
                                    .filter(|_| chunk.len() == 4)
                                    .and_then(|s| u32::from_str_radix(s, 16).ok())
                                    .and_then(char::from_u32);
                                if let Some(c) = decoded {
                                    result.push(c);
                                }
                            }
                        }
                        Some('\\') => {
                            chars.next(); // consume '\'
                            let hex: String = chars.by_ref().take(2).collect();
                            if let Ok(code) = u8::from_str_radix(&hex, 16) {
                                result.push(char::from(code));
                            }
                        }
                        _ => {
                            result.push('\\');
                            result.push('X');
                        }
                    }
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                Some('S') => {
                    chars.next(); // 'S'
                    chars.next(); // '\'
                    if let Some(c) = chars.next().and_then(|c| char::from_u32(u32::from(c) + 128)) {
                        result.push(c);
                    }
                }
                _ => result.push('\\'),
            }
        } else if ch == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
            }
            result.push('\'');
        } else {
            result.push(ch);
        }
    }

    result
}
