use super::*;
use crate::intern::TypeInterner;
use crate::test_support::MapHierarchyOracle;
use crate::types::FieldMap;
use oo_common::EngineOptions;
use std::sync::Arc;

#[test]
fn scalar_widening_matches_but_not_reverse() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let int_type = interner.scalar("int", false, false);
    let double_type = interner.scalar("double", false, false);
    let boolean_type = interner.scalar("boolean", false, false);

    assert!(matches(&int_type, &double_type, &ctx));
    assert!(!matches(&double_type, &int_type, &ctx));
    assert!(!matches(&boolean_type, &int_type, &ctx));
}

#[test]
fn array_requires_equal_dimension_and_compatible_element() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new().with_superclass("B", "A");
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let a = interner.class(Arc::from("A"), FieldMap::new(), false, false);
    let b = interner.class(Arc::from("B"), FieldMap::new(), false, false);

    let array_b_2 = interner.array(2, b.clone(), false);
    let array_a_2 = interner.array(2, a.clone(), false);
    let array_b_1 = interner.array(1, b, false);

    assert!(matches(&array_b_2, &array_a_2, &ctx));
    assert!(!matches(&array_b_1, &array_a_2, &ctx));
}

#[test]
fn parameterized_ignores_arguments_when_raw_equal() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let string_type = interner.class(Arc::from("String"), FieldMap::new(), false, false);
    let object_type = interner.object_class();
    let list_of_string = interner.parameterized(Arc::from("List"), vec![string_type], true, FieldMap::new(), None, false);
    let list_of_object = interner.parameterized(Arc::from("List"), vec![object_type], true, FieldMap::new(), None, false);

    assert!(matches(&list_of_string, &list_of_object, &ctx));
}

#[test]
fn wildcard_lower_bound_covers_supertypes_of_the_bound() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new().with_superclass("String", "CharSequence");
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let string_type = interner.class(Arc::from("String"), FieldMap::new(), false, false);
    let char_sequence = interner.class(Arc::from("CharSequence"), FieldMap::new(), true, false);
    let integer_type = interner.class(Arc::from("Integer"), FieldMap::new(), false, false);

    let lower_bounded = interner.wildcard(Some(string_type), false);

    assert!(covers(&lower_bounded, &char_sequence, &ctx));
    assert!(!covers(&lower_bounded, &integer_type, &ctx));
}

#[test]
fn object_covers_everything() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let object_type = interner.object_class();
    let int_type = interner.scalar("int", false, false);
    let array_type = interner.array(1, int_type.clone(), false);
    let symbolic = interner.symbolic("T", None);

    assert!(covers(&object_type, &int_type, &ctx));
    assert!(covers(&object_type, &array_type, &ctx));
    assert!(covers(&object_type, &symbolic, &ctx));
}

#[test]
fn array_invocation_against_wildcard_declaration_delegates() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let int_type = interner.scalar("int", false, false);
    let array_type = interner.array(1, int_type, false);
    let unbounded_wildcard = interner.wildcard(None, true);

    assert!(matches(&array_type, &unbounded_wildcard, &ctx));
}

#[test]
fn enum_declaration_requires_identical_erasure() {
    let interner = TypeInterner::new();
    let oracle = MapHierarchyOracle::new();
    let options = EngineOptions::default();
    let ctx = RelationContext { oracle: &oracle, options: &options };

    let day = interner.enum_type(Arc::from("Day"), FieldMap::new(), vec![Arc::from("MON")]);
    let other_day = interner.enum_type(Arc::from("Day"), FieldMap::new(), vec![Arc::from("MON")]);
    let month = interner.enum_type(Arc::from("Month"), FieldMap::new(), vec![Arc::from("JAN")]);

    assert!(matches(&day, &other_day, &ctx));
    assert!(!matches(&day, &month, &ctx));
}
