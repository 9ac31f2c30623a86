//! Descriptor Invariant Tests
//!
//! - Construction preserves types, names and order
//! - Byte size is the sum of field type lengths
//! - Merge concatenates and renumbers
//! - Equality and hashing ignore names
//! - Out-of-range and unmatched lookups always fail

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use tupledesc::schema::{FieldType, SchemaErrorCode, TupleDesc, Type};

// =============================================================================
// Helper Functions
// =============================================================================

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A caller-supplied type catalog, to check the descriptor only relies on
/// the `FieldType` contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Column {
    Fixed(usize),
    Flag,
}

impl FieldType for Column {
    fn byte_len(&self) -> usize {
        match self {
            Column::Fixed(n) => *n,
            Column::Flag => 1,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Fixed(n) => write!(f, "FIXED{}", n),
            Column::Flag => write!(f, "FLAG"),
        }
    }
}

// =============================================================================
// Construction Tests
// =============================================================================

/// Field count and types match the construction input for every length.
#[test]
fn test_construction_preserves_types() {
    let catalog = [Type::Int, Type::String];
    for len in 1..=16 {
        let types: Vec<Type> = (0..len).map(|i| catalog[i % 2]).collect();
        let names: Vec<Option<String>> = (0..len).map(|i| Some(format!("f{}", i))).collect();

        let desc = TupleDesc::new(types.clone(), names).unwrap();
        assert_eq!(desc.field_count(), len);
        for (i, t) in types.iter().enumerate() {
            assert_eq!(desc.field_type(i).unwrap(), t);
            assert_eq!(desc.field_name(i).unwrap(), Some(format!("f{}", i).as_str()));
        }
    }
}

#[test]
fn test_empty_and_mismatched_rejected() {
    let err = TupleDesc::<Type>::anonymous(Vec::new()).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::InvalidSchema);

    let err = TupleDesc::new(vec![Type::Int], vec![Some("a"), Some("b")]).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::InvalidSchema);
}

// =============================================================================
// Size Tests
// =============================================================================

#[test]
fn test_byte_size_of_repeated_int() {
    for n in 1..=32 {
        let desc = TupleDesc::anonymous(vec![Type::Int; n]).unwrap();
        assert_eq!(desc.byte_size(), 4 * n);
    }
}

#[test]
fn test_byte_size_custom_types() {
    let desc = TupleDesc::anonymous(vec![Column::Fixed(8), Column::Flag, Column::Fixed(0)]).unwrap();
    assert_eq!(desc.byte_size(), 9);
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_out_of_range_never_defaults() {
    let desc = TupleDesc::anonymous(vec![Type::Int, Type::String]).unwrap();
    let count = desc.field_count();

    for index in [count, count + 1, usize::MAX] {
        assert_eq!(
            desc.field_type(index).unwrap_err().code(),
            SchemaErrorCode::IndexOutOfRange
        );
        assert_eq!(
            desc.field_name(index).unwrap_err().code(),
            SchemaErrorCode::IndexOutOfRange
        );
    }
}

#[test]
fn test_duplicate_names_first_wins() {
    let desc = TupleDesc::new(vec![Type::Int, Type::String], vec![Some("a"), Some("a")]).unwrap();
    assert_eq!(desc.index_of_name("a").unwrap(), 0);
}

#[test]
fn test_name_lookup_exact_match() {
    let desc = TupleDesc::new(
        vec![Type::Int, Type::Int, Type::Int],
        vec![None, Some("Id"), Some("id")],
    )
    .unwrap();

    assert_eq!(desc.index_of_name("id").unwrap(), 2);
    assert_eq!(desc.index_of_name("Id").unwrap(), 1);
    assert_eq!(
        desc.index_of_name("ID").unwrap_err().code(),
        SchemaErrorCode::NameNotFound
    );
    assert_eq!(
        desc.index_of_name(None).unwrap_err().code(),
        SchemaErrorCode::NameNotFound
    );
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_merge_layout() {
    let a = TupleDesc::new(vec![Type::String, Type::Int], vec![Some("x"), None]).unwrap();
    let b = TupleDesc::new(vec![Type::Int, Type::String, Type::Int], vec![Some("x"), Some("y"), None])
        .unwrap();
    let merged = TupleDesc::merge(&a, &b);

    assert_eq!(merged.field_count(), a.field_count() + b.field_count());
    for i in 0..merged.field_count() {
        let expected = if i < a.field_count() {
            a.field_type(i).unwrap()
        } else {
            b.field_type(i - a.field_count()).unwrap()
        };
        assert_eq!(merged.field_type(i).unwrap(), expected);
    }

    let names: Vec<Option<&str>> = merged.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec![Some("x"), None, Some("x"), Some("y"), None]);
    assert_eq!(merged.byte_size(), a.byte_size() + b.byte_size());
}

#[test]
fn test_merge_equals_flat_construction() {
    let one = TupleDesc::new(vec![Type::Int], vec![Some("a")]).unwrap();
    let two = TupleDesc::anonymous(vec![Type::Int, Type::Int]).unwrap();
    let merged = TupleDesc::merge(&one, &two);

    assert_eq!(merged.field_count(), 3);
    assert!(merged.iter().all(|f| *f.field_type() == Type::Int));
    assert_eq!(merged, TupleDesc::anonymous(vec![Type::Int; 3]).unwrap());
}

// =============================================================================
// Equality & Hashing Tests
// =============================================================================

#[test]
fn test_equality_ignores_names() {
    let named = TupleDesc::new(vec![Type::Int, Type::String], vec![Some("x"), Some("y")]).unwrap();
    let unnamed = TupleDesc::new(vec![Type::Int, Type::String], vec![None::<&str>, None]).unwrap();

    assert_eq!(named, unnamed);
    assert_eq!(unnamed, named);
    assert_eq!(named, named.clone());
    assert_eq!(hash_of(&named), hash_of(&unnamed));
}

#[test]
fn test_hash_is_order_sensitive() {
    let a = TupleDesc::anonymous(vec![Type::Int, Type::String]).unwrap();
    let b = TupleDesc::anonymous(vec![Type::String, Type::Int]).unwrap();
    assert_ne!(a, b);
    assert_ne!(hash_of(&a), hash_of(&b));
}

/// Renaming fields must not invalidate a cache keyed by descriptor.
#[test]
fn test_descriptor_as_cache_key() {
    let mut plans: HashMap<TupleDesc<Type>, &str> = HashMap::new();
    let scan = TupleDesc::new(vec![Type::Int, Type::String], vec![Some("id"), Some("name")]).unwrap();
    plans.insert(scan, "seq_scan");

    let aliased = TupleDesc::new(vec![Type::Int, Type::String], vec![Some("u.id"), Some("u.name")]).unwrap();
    assert_eq!(plans.get(&aliased), Some(&"seq_scan"));

    let other = TupleDesc::anonymous(vec![Type::Int]).unwrap();
    assert!(plans.get(&other).is_none());
}

// =============================================================================
// Display & Concurrency Tests
// =============================================================================

#[test]
fn test_describe_one_entry_per_field() {
    let desc = TupleDesc::new(vec![Column::Fixed(4), Column::Flag], vec![Some("id"), None]).unwrap();
    assert_eq!(desc.describe(), "FIXED4(id),FLAG(null)");
}

#[test]
fn test_shared_across_threads() {
    let desc = TupleDesc::new(vec![Type::Int, Type::String], vec![Some("id"), Some("name")]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let desc = desc.clone();
            std::thread::spawn(move || (desc.byte_size(), desc.index_of_name("name").unwrap()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (136, 1));
    }
}
