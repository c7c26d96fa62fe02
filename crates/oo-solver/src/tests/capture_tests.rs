use super::*;
use crate::intern::TypeInterner;
use crate::test_support::MapHierarchyOracle;
use crate::types::FieldMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[test]
fn capture_then_substitute_map_example() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();

    let k = interner.symbolic("K", None);
    let v = interner.symbolic("V", None);
    let declared_map = interner.parameterized(Arc::from("Map"), vec![k.clone(), v.clone()], true, FieldMap::new(), None, false);

    let string_type = interner.class(Arc::from("String"), FieldMap::new(), false, false);
    let integer_type = interner.class(Arc::from("Integer"), FieldMap::new(), false, false);
    let target_map = interner.parameterized(Arc::from("Map"), vec![string_type.clone(), integer_type.clone()], true, FieldMap::new(), None, false);

    let mut seen = HashSet::new();
    let mut captured_syms = HashMap::new();
    let mut captured_wilds = HashMap::new();
    parse_and_map_symbols(&declared_map, &target_map, &Breadcrumb::new(), &mut seen, &mut captured_syms, &mut captured_wilds, &oracle);

    assert_eq!(captured_syms.get(&k.index()), Some(&string_type));
    assert_eq!(captured_syms.get(&v.index()), Some(&integer_type));

    // Map<V, List<K>>
    let list_of_k = interner.parameterized(Arc::from("List"), vec![k.clone()], true, FieldMap::new(), None, false);
    let return_type = interner.parameterized(Arc::from("Map"), vec![v, list_of_k], true, FieldMap::new(), None, false);

    let mut already_replaced = HashSet::new();
    let (changed, result) = replace_symbol(&return_type, &Breadcrumb::new(), &mut already_replaced, &captured_syms, &captured_wilds, &interner, &oracle);
    assert!(changed);

    let expected_list_of_string = interner.parameterized(Arc::from("List"), vec![string_type], true, FieldMap::new(), None, false);
    let expected = interner.parameterized(Arc::from("Map"), vec![integer_type, expected_list_of_string], true, FieldMap::new(), None, false);
    assert_eq!(result, expected);
}

#[test]
fn symbolic_does_not_rebind_on_repeat_visit() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();

    let t = interner.symbolic("T", None);
    let declared = interner.parameterized(Arc::from("Pair"), vec![t.clone(), t.clone()], true, FieldMap::new(), None, false);

    let string_type = interner.class(Arc::from("String"), FieldMap::new(), false, false);
    let integer_type = interner.class(Arc::from("Integer"), FieldMap::new(), false, false);
    let target = interner.parameterized(Arc::from("Pair"), vec![string_type.clone(), integer_type.clone()], true, FieldMap::new(), None, false);

    let mut seen = HashSet::new();
    let mut captured_syms = HashMap::new();
    let mut captured_wilds = HashMap::new();
    parse_and_map_symbols(&declared, &target, &Breadcrumb::new(), &mut seen, &mut captured_syms, &mut captured_wilds, &oracle);

    // Each occurrence sits at a distinct breadcrumb frame (argument index 0
    // vs 1 of the same container), so `seen` does not block the second
    // capture; the later occurrence's
    // binding wins in `captured_syms` since both key the same Symbolic.
    assert_eq!(captured_syms.get(&t.index()), Some(&integer_type));
}

#[test]
fn wildcard_capture_is_keyed_by_position_not_identity() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();

    let wildcard = interner.wildcard(None, true);
    let declared = interner.parameterized(Arc::from("List"), vec![wildcard], true, FieldMap::new(), None, false);

    let string_type = interner.class(Arc::from("String"), FieldMap::new(), false, false);
    let target = interner.parameterized(Arc::from("List"), vec![string_type.clone()], true, FieldMap::new(), None, false);

    let mut seen = HashSet::new();
    let mut captured_syms = HashMap::new();
    let mut captured_wilds = HashMap::new();
    parse_and_map_symbols(&declared, &target, &Breadcrumb::new(), &mut seen, &mut captured_syms, &mut captured_wilds, &oracle);

    assert_eq!(captured_wilds.len(), 1);
    assert_eq!(captured_wilds.values().next(), Some(&string_type));
}

#[test]
fn bound_wildcard_or_symbolic_unwraps_first_bound() {
    let interner = TypeInterner::new();
    let comparable = interner.class(Arc::from("Comparable"), FieldMap::new(), true, false);
    let symbolic = interner.symbolic("T", Some(vec![comparable.clone()]));
    assert_eq!(bound_wildcard_or_symbolic(&symbolic, &interner), comparable);

    let unbounded = interner.symbolic("U", None);
    assert_eq!(bound_wildcard_or_symbolic(&unbounded, &interner), unbounded);
}

#[test]
fn symbolic_replacement_through_hierarchy_walk() {
    let interner = TypeInterner::new();

    // class A<T> { T f; }
    let t = interner.symbolic("T", None);
    let a_template = interner.parameterized(Arc::from("A"), vec![t.clone()], true, FieldMap::new(), None, false);

    // class B<U> extends A<U> {}
    let oracle = MapHierarchyOracle::new()
        .with_superclass("B", "A")
        .with_proper_type("A", a_template.clone());

    let string_type = interner.class(Arc::from("String"), FieldMap::new(), false, false);
    let actual_b_string = interner.parameterized(Arc::from("B"), vec![string_type.clone()], true, FieldMap::new(), None, false);

    let result = replacement_for_symbolic(&t, &actual_b_string, None, &interner, &oracle);
    assert_eq!(result, Some(string_type));
}
