//! Shared test fixtures for unit and integration tests.

use crate::hierarchy::{HierarchyOracle, OpaqueBinding};
use crate::ids::{BitIndex, ClassHash};
use crate::types::TypeInfo;
use oo_common::TokenRange;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A `HierarchyOracle` test double built from a flat `extends`/`implements`
/// map: register edges explicitly, then query.
#[derive(Default)]
pub struct MapHierarchyOracle {
    superclass: HashMap<ClassHash, ClassHash>,
    interfaces: HashMap<ClassHash, Vec<ClassHash>>,
    bit_index: HashMap<ClassHash, BitIndex>,
    proper_types: HashMap<ClassHash, TypeInfo>,
    soft_types: HashMap<ClassHash, TypeInfo>,
}

impl MapHierarchyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_superclass(mut self, class: &str, superclass: &str) -> Self {
        self.superclass.insert(Arc::from(class), Arc::from(superclass));
        self
    }

    pub fn with_interface(mut self, class: &str, interface: &str) -> Self {
        self.interfaces.entry(Arc::from(class)).or_default().push(Arc::from(interface));
        self
    }

    pub fn with_bit_index(mut self, class: &str, index: u32) -> Self {
        self.bit_index.insert(Arc::from(class), BitIndex(index));
        self
    }

    pub fn with_proper_type(mut self, class: &str, type_info: TypeInfo) -> Self {
        self.proper_types.insert(Arc::from(class), type_info);
        self
    }

    pub fn with_soft_type(mut self, class: &str, type_info: TypeInfo) -> Self {
        self.soft_types.insert(Arc::from(class), type_info);
        self
    }
}

impl HierarchyOracle for MapHierarchyOracle {
    fn all_supertypes(&self, class_hash: &ClassHash) -> HashSet<ClassHash> {
        let mut out = HashSet::new();
        let mut current = class_hash.clone();
        while let Some(super_class) = self.superclass.get(&current) {
            out.insert(super_class.clone());
            current = super_class.clone();
        }
        if let Some(interfaces) = self.interfaces.get(class_hash) {
            for iface in interfaces {
                out.insert(iface.clone());
                out.extend(self.all_supertypes(iface));
            }
        }
        out
    }

    fn all_subtypes(&self, class_hash: &ClassHash) -> HashSet<ClassHash> {
        let mut out = HashSet::new();
        for (class, super_class) in &self.superclass {
            if super_class == class_hash {
                out.insert(class.clone());
            }
        }
        for (class, interfaces) in &self.interfaces {
            if interfaces.contains(class_hash) {
                out.insert(class.clone());
            }
        }
        out
    }

    fn superclass_of(&self, class_hash: &ClassHash) -> Option<ClassHash> {
        self.superclass.get(class_hash).cloned()
    }

    fn interfaces_of(&self, class_hash: &ClassHash) -> Vec<ClassHash> {
        self.interfaces.get(class_hash).cloned().unwrap_or_default()
    }

    fn bit_index_of(&self, class_hash: &ClassHash) -> Option<BitIndex> {
        self.bit_index.get(class_hash).copied()
    }

    fn class_hash_from_bit_index(&self, index: BitIndex) -> Option<ClassHash> {
        self.bit_index.iter().find(|(_, i)| **i == index).map(|(c, _)| c.clone())
    }

    fn class_signature_from_hash(&self, class_hash: &ClassHash) -> Option<String> {
        Some(format!("L{class_hash};"))
    }

    fn soft_type_from_class_id(&self, class_hash: &ClassHash) -> Option<TypeInfo> {
        self.soft_types.get(class_hash).cloned()
    }

    fn proper_type_from_class_id(&self, class_hash: &ClassHash) -> Option<TypeInfo> {
        self.proper_types.get(class_hash).cloned()
    }

    fn binding_hash(&self, binding: &dyn OpaqueBinding, _range: Option<TokenRange>) -> Option<String> {
        Some(binding.identity().to_string())
    }

    fn class_hash_from_binding_hash(&self, hash: &str) -> Option<ClassHash> {
        self.proper_types.keys().find(|c| c.as_ref() == hash).cloned()
    }
}
