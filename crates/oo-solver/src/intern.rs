//! The type interner.
//!
//! A process-wide, thread-safe hash-consing structure. `put_or_get` and
//! `get` are atomic with respect to the index-to-descriptor mapping: once
//! `put_or_get` returns, `get` on any thread observes the same descriptor.
//! No `TypeKey` is ever constructed as a standalone `TypeInfo` outside this
//! file — `TypeKey::` variant construction is quarantined to the helpers
//! below (see `typekey_contract_tests`).

use crate::error::assert_invariant;
use crate::ids::{ClassHash, TypeIndex};
use crate::types::{
    ArgList, ArrayType, BoundList, ClassType, EnumType, FieldMap, ParameterizedType, ScalarType,
    SymbolicType, TypeInfo, TypeKey, WildcardType,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// The hash-consing table for `TypeKey` descriptors.
pub struct TypeInterner {
    forward: DashMap<Arc<TypeKey>, TypeIndex, FxBuildHasher>,
    reverse: RwLock<Vec<Arc<TypeKey>>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            forward: DashMap::with_hasher(FxBuildHasher),
            reverse: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.reverse.read().expect("intern table poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the canonical `TypeInfo` for `key`, interning it with a
    /// fresh `TypeIndex` if this is the first time this exact structural
    /// shape has been seen. Idempotent under repeated calls.
    pub fn put_or_get(&self, key: TypeKey) -> TypeInfo {
        let key_arc = Arc::new(key);
        match self.forward.entry(key_arc.clone()) {
            Entry::Occupied(existing) => {
                let index = *existing.get();
                TypeInfo::new(index, key_arc)
            }
            Entry::Vacant(vacant) => {
                let mut reverse = self.reverse.write().expect("intern table poisoned");
                let index = TypeIndex(reverse.len() as u32);
                reverse.push(key_arc.clone());
                vacant.insert(index);
                if index.0 != 0 && index.0.is_power_of_two() {
                    tracing::trace!(len = index.0 + 1, "intern table growth checkpoint");
                }
                TypeInfo::new(index, key_arc)
            }
        }
    }

    /// Constant-time lookup from index to descriptor.
    pub fn get(&self, index: TypeIndex) -> Option<TypeInfo> {
        let reverse = self.reverse.read().expect("intern table poisoned");
        reverse
            .get(index.0 as usize)
            .cloned()
            .map(|key| TypeInfo::new(index, key))
    }

    /// Release all descriptors and cached calculations at once, so repeat
    /// analyses can run back-to-back in one process.
    pub fn reset(&self) {
        self.forward.clear();
        self.reverse
            .write()
            .expect("intern table poisoned")
            .clear();
    }

    // =========================================================================
    // Constructors — the only place `TypeKey::` variants are built.
    // =========================================================================

    pub fn scalar(&self, name: impl Into<Arc<str>>, is_class_type: bool, is_box_type: bool) -> TypeInfo {
        self.put_or_get(TypeKey::Scalar(ScalarType {
            name: name.into(),
            is_class_type,
            is_box_type,
        }))
    }

    pub fn class(
        &self,
        class_hash: ClassHash,
        fields: FieldMap,
        is_interface: bool,
        is_inner: bool,
    ) -> TypeInfo {
        self.put_or_get(TypeKey::Class(Box::new(ClassType {
            class_hash,
            fields,
            is_interface,
            is_inner,
        })))
    }

    pub fn enum_type(&self, class_hash: ClassHash, fields: FieldMap, constants: Vec<Arc<str>>) -> TypeInfo {
        self.put_or_get(TypeKey::Enum(Box::new(EnumType {
            class_hash,
            fields,
            constants,
        })))
    }

    pub fn array(&self, dimension: u32, element: TypeInfo, is_var_args: bool) -> TypeInfo {
        assert_invariant!(dimension >= 1, "array dimension", "dimension was {dimension}, must be >= 1");
        assert_invariant!(
            !element.is_array(),
            "array element",
            "element {:?} must not itself be an Array",
            element.name()
        );
        self.put_or_get(TypeKey::Array(Box::new(ArrayType {
            dimension,
            element,
            is_var_args,
        })))
    }

    pub fn parameterized(
        &self,
        raw_class_hash: ClassHash,
        arguments: Vec<TypeInfo>,
        from_source: bool,
        fields: FieldMap,
        type_arg_to_field_name: Option<BTreeMap<u32, Arc<str>>>,
        is_inner: bool,
    ) -> TypeInfo {
        assert_invariant!(
            raw_class_hash.as_ref() != crate::ids::WILDCARD_HASH,
            "parameterized raw_class_hash",
            "raw_class_hash must not be a wildcard, got {raw_class_hash:?}"
        );
        let arity = arguments.len() as u32;
        let arguments: ArgList = arguments.into();
        self.put_or_get(TypeKey::Parameterized(Box::new(ParameterizedType {
            raw_class_hash,
            arity,
            arguments,
            from_source,
            fields,
            type_arg_to_field_name,
            is_inner,
        })))
    }

    pub fn symbolic(&self, name: impl Into<Arc<str>>, bounds: Option<Vec<TypeInfo>>) -> TypeInfo {
        if let Some(b) = &bounds {
            assert_invariant!(!b.is_empty(), "symbolic bounds", "bounds must be absent or non-empty");
        }
        let bounds: Option<BoundList> = bounds.map(SmallVec::from_vec);
        self.put_or_get(TypeKey::Symbolic(Box::new(SymbolicType {
            name: name.into(),
            bounds,
        })))
    }

    pub fn wildcard(&self, bound: Option<TypeInfo>, is_upper: bool) -> TypeInfo {
        self.put_or_get(TypeKey::Wildcard(Box::new(WildcardType { bound, is_upper })))
    }

    /// The universal root type, interned with no fields.
    pub fn object_class(&self) -> TypeInfo {
        self.class(Arc::from(crate::ids::OBJECT_NAME), FieldMap::new(), false, false)
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
