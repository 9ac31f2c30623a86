//! Tuple descriptor: the immutable, ordered schema of a tuple
//!
//! # Invariants
//!
//! - At least one field, indices 0-based and contiguous
//! - Field order is declaration order and never changes
//! - Byte size is the sum of the field types' byte lengths
//! - Equality and hashing look at field types only, never at names
//!
//! Descriptors are values. Clones share the underlying field slice, and any
//! "modification" such as [`TupleDesc::merge`] produces a new descriptor.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice;
use std::sync::Arc;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};
use super::types::FieldType;

/// One column of a tuple: a type and an optional name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field<T> {
    #[serde(rename = "type")]
    field_type: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl<T: FieldType> Field<T> {
    /// Create a field with an optional name
    pub fn new(field_type: T, name: Option<String>) -> Self {
        Self { field_type, name }
    }

    /// Create a named field
    pub fn named(field_type: T, name: impl Into<String>) -> Self {
        Self::new(field_type, Some(name.into()))
    }

    /// Create a field without a name
    pub fn anonymous(field_type: T) -> Self {
        Self::new(field_type, None)
    }

    pub fn field_type(&self) -> &T {
        &self.field_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Renders as `name(type)`, with `null` standing in for an absent name.
impl<T: FieldType> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name().unwrap_or("null"), self.field_type)
    }
}

/// Schema of a tuple: an immutable ordered list of [`Field`]s.
#[derive(Debug, Clone)]
pub struct TupleDesc<T> {
    fields: Arc<[Field<T>]>,
    byte_size: usize,
}

impl<T: FieldType> TupleDesc<T> {
    /// Create a descriptor from parallel type and name sequences.
    ///
    /// `names[i]` names `types[i]`; a `None` entry leaves that field
    /// anonymous. Fails with `InvalidSchema` when the sequences differ in
    /// length or `types` is empty.
    pub fn new<S: Into<String>>(
        types: impl IntoIterator<Item = T>,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> SchemaResult<Self> {
        let types: Vec<T> = types.into_iter().collect();
        let names: Vec<Option<String>> = names.into_iter().map(|n| n.map(Into::into)).collect();

        if types.len() != names.len() {
            return Err(SchemaError::invalid_schema(format!(
                "{} field types but {} field names",
                types.len(),
                names.len()
            )));
        }

        let fields = types
            .into_iter()
            .zip(names)
            .map(|(t, n)| Field::new(t, n))
            .collect();
        Self::from_fields(fields)
    }

    /// Create a descriptor whose fields are all anonymous.
    pub fn anonymous(types: impl IntoIterator<Item = T>) -> SchemaResult<Self> {
        Self::from_fields(types.into_iter().map(Field::anonymous).collect())
    }

    /// Create a descriptor from already paired fields.
    pub fn from_fields(fields: Vec<Field<T>>) -> SchemaResult<Self> {
        if fields.is_empty() {
            return Err(SchemaError::invalid_schema(
                "a descriptor must contain at least one field",
            ));
        }

        let byte_size = fields
            .iter()
            .try_fold(0usize, |acc, f| acc.checked_add(f.field_type.byte_len()))
            .ok_or_else(|| SchemaError::invalid_schema("tuple byte size overflows usize"))?;
        Ok(Self {
            fields: fields.into(),
            byte_size,
        })
    }

    /// Concatenate two descriptors: all of `first`'s fields, then all of
    /// `second`'s, renumbered from 0.
    ///
    /// Names are carried over as-is. Duplicate names are kept, and only the
    /// leftmost stays reachable through [`index_of_name`](Self::index_of_name).
    ///
    /// Merge never fails: if the combined byte size exceeds `usize::MAX` it
    /// saturates at `usize::MAX`.
    pub fn merge(first: &Self, second: &Self) -> Self {
        let fields: Arc<[Field<T>]> = first
            .fields
            .iter()
            .chain(second.fields.iter())
            .cloned()
            .collect();

        Self {
            fields,
            byte_size: first.byte_size.saturating_add(second.byte_size),
        }
    }

    /// Iterate over the fields in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, Field<T>> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field at position `index`.
    pub fn field(&self, index: usize) -> SchemaResult<&Field<T>> {
        self.fields
            .get(index)
            .ok_or_else(|| SchemaError::index_out_of_range(index, self.fields.len()))
    }

    /// Returns the (possibly absent) name of the field at `index`.
    pub fn field_name(&self, index: usize) -> SchemaResult<Option<&str>> {
        self.field(index).map(Field::name)
    }

    /// Returns the type of the field at `index`.
    pub fn field_type(&self, index: usize) -> SchemaResult<&T> {
        self.field(index).map(Field::field_type)
    }

    /// Returns the lowest index whose field name equals `name` exactly.
    ///
    /// Anonymous fields never match. An absent query fails the same way as an
    /// unmatched one.
    pub fn index_of_name<'a>(&self, name: impl Into<Option<&'a str>>) -> SchemaResult<usize> {
        let query = name.into().ok_or_else(|| SchemaError::name_not_found(None))?;

        self.fields
            .iter()
            .position(|f| f.name() == Some(query))
            .ok_or_else(|| SchemaError::name_not_found(Some(query)))
    }

    /// Size in bytes of a tuple described by this descriptor.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Human-readable rendering, `Type0(name0),Type1(name1),...`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<'a, T: FieldType> IntoIterator for &'a TupleDesc<T> {
    type Item = &'a Field<T>;
    type IntoIter = slice::Iter<'a, Field<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: FieldType> PartialEq for TupleDesc<T> {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.fields, &other.fields) {
            return true;
        }

        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a.field_type == b.field_type)
    }
}

impl<T: FieldType> Eq for TupleDesc<T> {}

/// Folds the field count and each field type in order. Names are skipped so
/// that descriptors equal under `PartialEq` hash identically.
impl<T: FieldType> Hash for TupleDesc<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.fields.len());
        for field in self.fields.iter() {
            field.field_type.hash(state);
        }
    }
}

impl<T: FieldType> fmt::Display for TupleDesc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}({})", field.field_type, field.name().unwrap_or("null"))?;
        }
        Ok(())
    }
}

impl<T: FieldType + Serialize> Serialize for TupleDesc<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.fields.iter())
    }
}

impl<'de, T: FieldType + Deserialize<'de>> Deserialize<'de> for TupleDesc<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Vec::<Field<T>>::deserialize(deserializer)?;
        Self::from_fields(fields).map_err(de::Error::custom)
    }
}
