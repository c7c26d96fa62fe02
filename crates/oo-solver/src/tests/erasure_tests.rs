use super::*;
use crate::intern::TypeInterner;
use crate::test_support::MapHierarchyOracle;
use std::sync::Arc;

#[test]
fn scalar_erasure_is_its_own_name() {
    let interner = TypeInterner::new();
    let int_type = interner.scalar("int", false, false);
    assert_eq!(int_type.type_erasure().as_ref(), "int");
}

#[test]
fn class_and_parameterized_erasure_ignore_arguments() {
    let interner = TypeInterner::new();
    let string_type = interner.class(Arc::from("String"), crate::types::FieldMap::new(), false, false);
    let list_of_string = interner.parameterized(Arc::from("List"), vec![string_type.clone()], true, crate::types::FieldMap::new(), None, false);
    let raw_list = interner.parameterized(Arc::from("List"), vec![], true, crate::types::FieldMap::new(), None, false);
    assert_eq!(list_of_string.type_erasure(), raw_list.type_erasure());
    assert_eq!(string_type.type_erasure().as_ref(), "String");
}

#[test]
fn symbolic_erasure_uses_first_bound_only() {
    let interner = TypeInterner::new();
    let comparable = interner.class(Arc::from("Comparable"), crate::types::FieldMap::new(), true, false);
    let serializable = interner.class(Arc::from("Serializable"), crate::types::FieldMap::new(), true, false);
    let bounded = interner.symbolic("T", Some(vec![comparable.clone(), serializable]));
    assert_eq!(bounded.type_erasure(), comparable.type_erasure());

    let unbounded = interner.symbolic("U", None);
    assert_eq!(unbounded.type_erasure().as_ref(), crate::ids::OBJECT_NAME);
}

#[test]
fn upper_wildcard_erasure_is_bound_lower_is_object() {
    let interner = TypeInterner::new();
    let string_type = interner.class(Arc::from("String"), crate::types::FieldMap::new(), false, false);
    let upper = interner.wildcard(Some(string_type.clone()), true);
    let lower = interner.wildcard(Some(string_type), false);
    let unbounded = interner.wildcard(None, true);

    assert_eq!(upper.type_erasure().as_ref(), "String");
    assert_eq!(lower.type_erasure().as_ref(), crate::ids::OBJECT_NAME);
    assert_eq!(unbounded.type_erasure().as_ref(), crate::ids::OBJECT_NAME);
}

#[test]
fn canonicalize_names_strips_prefixes_and_walks_supertypes() {
    let oracle = MapHierarchyOracle::new().with_superclass("com.acme.Child", "com.acme.Parent");
    let names = canonicalize_names(&Arc::from("com.acme.Child"), &oracle);
    assert!(names.iter().any(|n| n.as_ref() == "Child"));
    assert!(names.iter().any(|n| n.as_ref() == "Parent"));
}

#[test]
fn library_prefix_is_stripped_before_package() {
    let oracle = MapHierarchyOracle::new();
    let names = canonicalize_names(&crate::ids::library_hash("java.util.List"), &oracle);
    assert!(names.iter().any(|n| n.as_ref() == "List"));
}

#[test]
fn names_match_handles_qualified_vs_unqualified() {
    assert!(names_match("List", "List"));
    assert!(names_match("java.util.List", "List"));
    assert!(!names_match("java.util.List", "ArrayList"));
}

#[test]
fn sets_match_requires_nonempty_intersection() {
    let mut a = std::collections::HashSet::new();
    a.insert(Arc::from("A") as Arc<str>);
    let mut b = std::collections::HashSet::new();
    b.insert(Arc::from("B") as Arc<str>);
    assert!(!sets_match(&a, &b));

    b.insert(Arc::from("A") as Arc<str>);
    assert!(sets_match(&a, &b));
}
