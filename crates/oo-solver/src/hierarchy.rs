//! The hierarchy oracle.
//!
//! Consumed, never implemented for production use by this crate: the driver
//! supplies a concrete oracle backed by the whole-program class hierarchy it
//! built while indexing source files. Only `all_supertypes` is used for the
//! actual "is T1 a supertype of T2" predicate the matches/covers relation
//! needs; the rest of the trait exists because the type calculator and
//! capture engine need the other oracle operations declared here.

use crate::ids::{BitIndex, ClassHash};
use crate::types::TypeInfo;
use oo_common::TokenRange;
use std::collections::HashSet;

/// An opaque front-end binding handle, as seen by the hierarchy oracle's
/// `binding_hash` operation.
pub trait OpaqueBinding {
    /// A string uniquely identifying this binding's declaration, stable
    /// across repeated queries in one analysis.
    fn identity(&self) -> &str;
}

/// Supplies subtype/supertype relations and class-hash bookkeeping over the
/// whole-program class hierarchy. Implemented by the driver;
/// the engine only consumes it.
pub trait HierarchyOracle: Send + Sync {
    /// Transitive superclasses and implemented interfaces of `class_hash`.
    fn all_supertypes(&self, class_hash: &ClassHash) -> HashSet<ClassHash>;

    /// Transitive subclasses and implementors of `class_hash`.
    fn all_subtypes(&self, class_hash: &ClassHash) -> HashSet<ClassHash>;

    /// The immediate superclass, if any (interfaces have none).
    fn superclass_of(&self, class_hash: &ClassHash) -> Option<ClassHash>;

    /// The immediate implemented interfaces, in declaration order.
    fn interfaces_of(&self, class_hash: &ClassHash) -> Vec<ClassHash>;

    fn bit_index_of(&self, class_hash: &ClassHash) -> Option<BitIndex>;
    fn class_hash_from_bit_index(&self, index: BitIndex) -> Option<ClassHash>;
    fn class_signature_from_hash(&self, class_hash: &ClassHash) -> Option<String>;

    /// Build a soft-mode (no fields) `TypeInfo` for a pre-registered class.
    fn soft_type_from_class_id(&self, class_hash: &ClassHash) -> Option<TypeInfo>;
    /// Build a proper-mode (fields populated) `TypeInfo` for a pre-registered class.
    fn proper_type_from_class_id(&self, class_hash: &ClassHash) -> Option<TypeInfo>;

    fn binding_hash(&self, binding: &dyn OpaqueBinding, range: Option<TokenRange>) -> Option<String>;
    fn class_hash_from_binding_hash(&self, hash: &str) -> Option<ClassHash>;

    /// "Is `supertype` a transitive supertype of `subtype`?" Implemented
    /// here in terms of `all_supertypes` so concrete oracles only need to
    /// implement the set operations; an oracle may override this for a
    /// faster direct query.
    fn is_transitive_supertype(&self, supertype: &ClassHash, subtype: &ClassHash) -> bool {
        if supertype == subtype {
            return true;
        }
        self.all_supertypes(subtype).contains(supertype)
    }
}

/// A hierarchy oracle with no registered classes. Missing hierarchy data is
/// treated as "no subtype relation" — a `None`-returning oracle call should
/// be treated as this empty oracle would answer.
pub struct EmptyHierarchyOracle;

impl HierarchyOracle for EmptyHierarchyOracle {
    fn all_supertypes(&self, _class_hash: &ClassHash) -> HashSet<ClassHash> {
        HashSet::new()
    }
    fn all_subtypes(&self, _class_hash: &ClassHash) -> HashSet<ClassHash> {
        HashSet::new()
    }
    fn superclass_of(&self, _class_hash: &ClassHash) -> Option<ClassHash> {
        None
    }
    fn interfaces_of(&self, _class_hash: &ClassHash) -> Vec<ClassHash> {
        Vec::new()
    }
    fn bit_index_of(&self, _class_hash: &ClassHash) -> Option<BitIndex> {
        None
    }
    fn class_hash_from_bit_index(&self, _index: BitIndex) -> Option<ClassHash> {
        None
    }
    fn class_signature_from_hash(&self, _class_hash: &ClassHash) -> Option<String> {
        None
    }
    fn soft_type_from_class_id(&self, _class_hash: &ClassHash) -> Option<TypeInfo> {
        None
    }
    fn proper_type_from_class_id(&self, _class_hash: &ClassHash) -> Option<TypeInfo> {
        None
    }
    fn binding_hash(&self, _binding: &dyn OpaqueBinding, _range: Option<TokenRange>) -> Option<String> {
        None
    }
    fn class_hash_from_binding_hash(&self, _hash: &str) -> Option<ClassHash> {
        None
    }
}
