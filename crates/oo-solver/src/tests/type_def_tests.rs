use super::*;
use crate::intern::TypeInterner;
use std::sync::Arc;

#[test]
fn equality_is_index_based() {
    let interner = TypeInterner::new();
    let a = interner.scalar("int", false, false);
    let b = interner.scalar("int", false, false);
    assert_eq!(a, b);
    assert_eq!(a.index(), b.index());
}

#[test]
fn name_delegates_to_variant() {
    let interner = TypeInterner::new();
    let scalar = interner.scalar("int", false, false);
    assert_eq!(scalar.name().as_ref(), "int");

    let class = interner.class(Arc::from("Foo"), FieldMap::new(), false, false);
    assert_eq!(class.name().as_ref(), "Foo");

    let array = interner.array(1, scalar.clone(), false);
    assert_eq!(array.name().as_ref(), "int");
}

#[test]
fn needs_replacement_is_transitive() {
    let interner = TypeInterner::new();
    let concrete = interner.scalar("int", false, false);
    let symbolic = interner.symbolic("T", None);

    assert!(!concrete.needs_replacement());
    assert!(symbolic.needs_replacement());

    let array_of_symbolic = interner.array(1, symbolic.clone(), false);
    assert!(array_of_symbolic.needs_replacement());

    let array_of_concrete = interner.array(1, concrete.clone(), false);
    assert!(!array_of_concrete.needs_replacement());

    let parameterized = interner.parameterized(Arc::from("List"), vec![symbolic], false, FieldMap::new(), None, false);
    assert!(parameterized.needs_replacement());
}

#[test]
fn field_map_equality_is_order_independent() {
    let interner = TypeInterner::new();
    let int_type = interner.scalar("int", false, false);
    let bool_type = interner.scalar("boolean", false, false);

    let mut a = FieldMap::new();
    a.0.insert(
        qualified_field_name("Foo", "x"),
        FieldEntry { source_range: None, declaring_class_bit_index: BitIndex(0), field_type: int_type.clone() },
    );
    a.0.insert(
        qualified_field_name("Foo", "y"),
        FieldEntry { source_range: None, declaring_class_bit_index: BitIndex(0), field_type: bool_type.clone() },
    );

    let mut b = FieldMap::new();
    b.0.insert(
        qualified_field_name("Foo", "y"),
        FieldEntry { source_range: None, declaring_class_bit_index: BitIndex(0), field_type: bool_type },
    );
    b.0.insert(
        qualified_field_name("Foo", "x"),
        FieldEntry { source_range: None, declaring_class_bit_index: BitIndex(0), field_type: int_type },
    );

    assert_eq!(a, b);
}

#[test]
fn fields_accessor_is_variant_specific() {
    let interner = TypeInterner::new();
    let scalar = interner.scalar("int", false, false);
    let class = interner.class(Arc::from("Foo"), FieldMap::new(), false, false);
    let symbolic = interner.symbolic("T", None);

    assert!(scalar.fields().is_none());
    assert!(class.fields().is_some());
    assert!(symbolic.fields().is_none());
}

#[test]
fn library_dummy_field_name_format() {
    assert_eq!(library_dummy_field_name("List", 1).as_ref(), "List:DUMMY1");
}
