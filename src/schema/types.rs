//! Field type capability and the built-in type catalog
//!
//! A descriptor only needs three things from a field type: a fixed byte
//! length, value equality and a hash. Any type implementing [`FieldType`]
//! can back a [`TupleDesc`](super::TupleDesc).
//!
//! Built-in types:
//! - int: 32-bit signed integer (4 bytes)
//! - string: fixed-width string, `STRING_LEN` payload bytes plus a 4-byte length

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Maximum payload length of a built-in string field, in bytes
pub const STRING_LEN: usize = 128;

/// Capability a field type must provide to be used in a descriptor.
///
/// `byte_len` must be fixed for a given value: two equal types always report
/// the same length, and the length never changes over the value's lifetime.
pub trait FieldType: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// Number of bytes a value of this type occupies in a tuple
    fn byte_len(&self) -> usize;
}

/// Built-in field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// 32-bit signed integer
    Int,
    /// Fixed-width string, padded to `STRING_LEN`
    String,
}

impl FieldType for Type {
    fn byte_len(&self) -> usize {
        match self {
            Type::Int => 4,
            Type::String => STRING_LEN + 4,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "INT_TYPE"),
            Type::String => write!(f, "STRING_TYPE"),
        }
    }
}
