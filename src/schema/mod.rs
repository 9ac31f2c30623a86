//! Tuple schema descriptors
//!
//! A [`TupleDesc`] is the single source of truth for the shape of a tuple:
//! an ordered list of typed, optionally named fields. Everything that lays
//! out, reads or projects a record agrees on its descriptor.
//!
//! # Design Principles
//!
//! - Immutable after construction; merging builds a new descriptor
//! - At least one field, fixed byte length per field
//! - Equality and hashing are structural over field types, never names
//! - Absent names are `None`, and never match a name lookup

mod catalog;
mod descriptor;
mod errors;
mod types;

pub use catalog::DescriptorCatalog;
pub use descriptor::{Field, TupleDesc};
pub use errors::{
    CatalogError, CatalogResult, SchemaError, SchemaErrorCode, SchemaResult, Severity,
};
pub use types::{FieldType, Type, STRING_LEN};
