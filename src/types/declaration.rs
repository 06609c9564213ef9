//! Declaration types produced by the built-in observers.
//!
//! Declarations are dumb containers. The logic that populates them lives in
//! the observers; the only shared piece is [`Declaration::from_cursor`],
//! which captures identity and location from a single cursor.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::ast_engine::Cursor;

/// A position in a source file.
///
/// Line and column are indexed from 1. Offset is the byte offset in the
/// source file. Ordering is document order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl SourceLocation {
    /// The location as a `(file, line, column, offset)` tuple.
    pub fn as_tuple(&self) -> (&str, usize, usize, usize) {
        (&self.file, self.line, self.column, self.offset)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}[{}] ({})", self.file, self.line, self.column, self.offset)
    }
}

/// Fields common to every declaration.
///
/// All fields are captured from one cursor when the declaration is built
/// and never change afterwards. Two declarations with the same USR denote
/// the same logical entity, so equality and hashing only look at the USR.
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    name: String,
    spelling: String,
    usr: String,
    start_location: SourceLocation,
    end_location: SourceLocation,
}

impl Declaration {
    /// Capture identity and extent from a cursor.
    pub fn from_cursor(cursor: &Cursor<'_>) -> Self {
        let (start_location, end_location) = cursor.extent();

        Self {
            name: cursor.display_name(),
            spelling: cursor.spelling(),
            usr: cursor.usr(),
            start_location,
            end_location,
        }
    }

    /// Display name, possibly decorated with a signature.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plain identifier.
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Unified Symbol Resolution string.
    pub fn usr(&self) -> &str {
        &self.usr
    }

    pub fn start_location(&self) -> &SourceLocation {
        &self.start_location
    }

    pub fn end_location(&self) -> &SourceLocation {
        &self.end_location
    }

    /// Whether `other` denotes the same logical entity.
    pub fn same_entity(&self, other: &Declaration) -> bool {
        self.usr == other.usr
    }
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.same_entity(other)
    }
}

impl Eq for Declaration {}

impl Hash for Declaration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.usr.hash(state);
    }
}

/// A class field (member variable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Field {
    declaration: Declaration,
}

impl Field {
    pub fn from_cursor(cursor: &Cursor<'_>) -> Self {
        Self {
            declaration: Declaration::from_cursor(cursor),
        }
    }
}

impl Deref for Field {
    type Target = Declaration;

    fn deref(&self) -> &Declaration {
        &self.declaration
    }
}

/// Fields keyed by name, iterated in declaration order.
///
/// Inserting a name that is already present replaces the stored field in
/// place: the last write wins and the original position is kept.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: Vec<Field>,
    index: HashMap<String, usize>,
}

impl Fields {
    /// Insert a field under its display name, returning the field it replaced.
    pub(crate) fn insert(&mut self, field: Field) -> Option<Field> {
        match self.index.get(field.name()) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position], field)),
            None => {
                self.index.insert(field.name().to_string(), self.entries.len());
                self.entries.push(field);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|field| field.name())
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for field in &self.entries {
            map.serialize_entry(field.name(), field)?;
        }
        map.end()
    }
}

/// A C++ class definition.
///
/// Fields are only added while the class is being expanded. Once observers
/// are notified they receive a shared reference and the class is read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Class {
    #[serde(flatten)]
    declaration: Declaration,
    fields: Fields,
}

impl Class {
    pub fn from_cursor(cursor: &Cursor<'_>) -> Self {
        Self {
            declaration: Declaration::from_cursor(cursor),
            fields: Fields::default(),
        }
    }

    /// Fields in the order they were declared.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub(crate) fn insert_field(&mut self, field: Field) -> Option<Field> {
        self.fields.insert(field)
    }
}

impl Deref for Class {
    type Target = Declaration;

    fn deref(&self) -> &Declaration {
        &self.declaration
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.declaration == other.declaration
    }
}

impl Eq for Class {}

/// A finished entity handed to definition observers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    Class(Class),
}

impl Definition {
    /// The common declaration fields of the entity.
    pub fn declaration(&self) -> &Declaration {
        match self {
            Definition::Class(class) => &class.declaration,
        }
    }
}
