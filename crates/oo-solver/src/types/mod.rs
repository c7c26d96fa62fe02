//! Core type definitions for the type-resolution engine.
//!
//! `type_def` holds the `TypeKey` enum and all variant structs plus the
//! `TypeInfo` handle that callers actually carry around.

mod type_def;

pub use type_def::{
    ArgList, ArrayType, BoundList, ClassType, EnumType, FieldEntry, FieldMap, ParameterizedType,
    ScalarType, SymbolicType, TypeInfo, TypeKey, WildcardType, library_dummy_field_name,
    qualified_field_name,
};
