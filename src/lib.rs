//! tupledesc - Immutable tuple schema descriptors for a storage engine
//!
//! ```
//! use tupledesc::schema::{TupleDesc, Type};
//!
//! let users = TupleDesc::new(vec![Type::Int, Type::String], vec![Some("id"), Some("name")])?;
//! assert_eq!(users.field_count(), 2);
//! assert_eq!(users.index_of_name("name")?, 1);
//! assert_eq!(users.describe(), "INT_TYPE(id),STRING_TYPE(name)");
//! # Ok::<(), tupledesc::schema::SchemaError>(())
//! ```

pub mod config;
pub mod observability;
pub mod schema;

pub use config::CatalogConfig;
pub use schema::{Field, FieldType, SchemaError, SchemaResult, TupleDesc, Type};
