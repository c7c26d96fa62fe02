//! The `TypeKey` variant set and the `TypeInfo` handle.
//!
//! Large variants are boxed to keep the enum small; `TypeInfo` itself is
//! just a `TypeIndex` plus a cheap `Arc<TypeKey>` so callers never need to
//! round-trip through the interner to inspect a descriptor they already
//! hold.

use crate::ids::{BitIndex, ClassHash, TypeIndex};
use indexmap::IndexMap;
use oo_common::TokenRange;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A parameterized type's argument list. Most declarations take a handful
/// of type arguments; `4` keeps the common case off the heap.
pub type ArgList = SmallVec<[TypeInfo; 4]>;

/// A symbolic type's upper-bound list. Almost always zero or one bound;
/// only intersection-typed bounds exceed `2`.
pub type BoundList = SmallVec<[TypeInfo; 2]>;

// =============================================================================
// TypeInfo — the handle
// =============================================================================

/// The canonical, interned handle to a type descriptor. Equality and
/// hashing are index-based only: two `TypeInfo` are equal
/// iff they came from the same intern-table slot.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub(crate) index: TypeIndex,
    pub(crate) key: Arc<TypeKey>,
}

impl TypeInfo {
    pub(crate) fn new(index: TypeIndex, key: Arc<TypeKey>) -> Self {
        TypeInfo { index, key }
    }

    pub fn index(&self) -> TypeIndex {
        self.index
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

impl std::ops::Deref for TypeInfo {
    type Target = TypeKey;
    fn deref(&self) -> &TypeKey {
        &self.key
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

// =============================================================================
// Field maps
// =============================================================================

/// One entry of a `fields` mapping: `qualified_field_name -> (source_range?,
/// declaring_class_bit_index, field_type)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldEntry {
    pub source_range: Option<TokenRange>,
    pub declaring_class_bit_index: BitIndex,
    pub field_type: TypeInfo,
}

/// An ordered `qualified_field_name -> FieldEntry` mapping. Iteration order
/// follows declaration order; structural equality (needed for hash-consing)
/// is order-independent, since it is the same map either way.
#[derive(Clone, Debug, Default)]
pub struct FieldMap(pub IndexMap<Arc<str>, FieldEntry>);

impl FieldMap {
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.0.get(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Arc<str>, FieldEntry> {
        self.0.iter()
    }

    fn sorted_entries(&self) -> Vec<(&Arc<str>, &FieldEntry)> {
        let mut v: Vec<_> = self.0.iter().collect();
        v.sort_by(|a, b| a.0.cmp(b.0));
        v
    }
}

impl FromIterator<(Arc<str>, FieldEntry)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (Arc<str>, FieldEntry)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}

impl PartialEq for FieldMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.sorted_entries() == other.sorted_entries()
    }
}
impl Eq for FieldMap {}

impl Hash for FieldMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_entries().hash(state);
    }
}

/// `qualified_field_name = <declaring_short_name> ":" <field_name>`.
pub fn qualified_field_name(declaring_short_name: &str, field_name: &str) -> Arc<str> {
    Arc::from(format!("{declaring_short_name}:{field_name}"))
}

/// `<raw_short_name>:DUMMY<i>`, `i` starting at 1.
pub fn library_dummy_field_name(raw_short_name: &str, i: u32) -> Arc<str> {
    Arc::from(format!("{raw_short_name}:DUMMY{i}"))
}

// =============================================================================
// Variant structs
// =============================================================================

/// A primitive/scalar type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScalarType {
    pub name: Arc<str>,
    pub is_class_type: bool,
    pub is_box_type: bool,
}

/// A concrete class/interface type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub class_hash: ClassHash,
    pub fields: FieldMap,
    pub is_interface: bool,
    pub is_inner: bool,
}

/// An enum type. Enums cannot be supertyped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub class_hash: ClassHash,
    pub fields: FieldMap,
    pub constants: Vec<Arc<str>>,
}

/// An array type. `dimension` counts language-level
/// `[]` suffixes; the element is never itself an Array.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayType {
    pub dimension: u32,
    pub element: TypeInfo,
    pub is_var_args: bool,
}

/// A parameterized (generic) type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterizedType {
    pub raw_class_hash: ClassHash,
    pub arity: u32,
    pub arguments: ArgList,
    pub from_source: bool,
    pub fields: FieldMap,
    /// `type argument index -> declared field name`, populated only for
    /// source types whose declared field type mentions the corresponding
    /// type parameter.
    pub type_arg_to_field_name: Option<BTreeMap<u32, Arc<str>>>,
    pub is_inner: bool,
}

/// A type-variable. Bounds, if present, are non-empty and are upper bounds
/// only; the first bound determines erasure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolicType {
    pub name: Arc<str>,
    pub bounds: Option<BoundList>,
}

/// A wildcard type-argument slot. Never appears
/// outside a `Parameterized`'s `arguments` or as the bound of another
/// wildcard/symbolic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WildcardType {
    pub bound: Option<TypeInfo>,
    pub is_upper: bool,
}

// =============================================================================
// TypeKey
// =============================================================================

/// Every possible type descriptor shape. All variants are
/// value types: equality is structural equality of exposed fields, and
/// hashes are computed once at intern time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Scalar(ScalarType),
    Class(Box<ClassType>),
    Enum(Box<EnumType>),
    Array(Box<ArrayType>),
    Parameterized(Box<ParameterizedType>),
    Symbolic(Box<SymbolicType>),
    Wildcard(Box<WildcardType>),
}

impl TypeKey {
    /// A short identifier for this descriptor.
    pub fn name(&self) -> Arc<str> {
        match self {
            TypeKey::Scalar(s) => s.name.clone(),
            TypeKey::Class(c) => c.class_hash.clone(),
            TypeKey::Enum(e) => e.class_hash.clone(),
            TypeKey::Parameterized(p) => p.raw_class_hash.clone(),
            TypeKey::Array(a) => a.element.name(),
            TypeKey::Symbolic(s) => s.name.clone(),
            TypeKey::Wildcard(_) => Arc::from("?"),
        }
    }

    /// The declared fields mapping, or `None` for variants that cannot
    /// carry fields (Scalar, Array, Symbolic, Wildcard).
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            TypeKey::Class(c) => Some(&c.fields),
            TypeKey::Enum(e) => Some(&e.fields),
            TypeKey::Parameterized(p) => Some(&p.fields),
            _ => None,
        }
    }

    /// True iff this descriptor transitively contains any Symbolic or
    /// Wildcard.
    pub fn needs_replacement(&self) -> bool {
        match self {
            TypeKey::Scalar(_) | TypeKey::Class(_) | TypeKey::Enum(_) => false,
            TypeKey::Array(a) => a.element.needs_replacement(),
            TypeKey::Parameterized(p) => p.arguments.iter().any(|a| a.needs_replacement()),
            TypeKey::Symbolic(_) | TypeKey::Wildcard(_) => true,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeKey::Scalar(_))
    }
    pub fn is_class(&self) -> bool {
        matches!(self, TypeKey::Class(_))
    }
    pub fn is_enum(&self) -> bool {
        matches!(self, TypeKey::Enum(_))
    }
    pub fn is_array(&self) -> bool {
        matches!(self, TypeKey::Array(_))
    }
    pub fn is_parameterized(&self) -> bool {
        matches!(self, TypeKey::Parameterized(_))
    }
    pub fn is_symbolic(&self) -> bool {
        matches!(self, TypeKey::Symbolic(_))
    }
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeKey::Wildcard(_))
    }

    /// The `ClassHash` for Class/Enum/Parameterized variants.
    pub fn class_hash(&self) -> Option<&ClassHash> {
        match self {
            TypeKey::Class(c) => Some(&c.class_hash),
            TypeKey::Enum(e) => Some(&e.class_hash),
            TypeKey::Parameterized(p) => Some(&p.raw_class_hash),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/type_def_tests.rs"]
mod tests;
