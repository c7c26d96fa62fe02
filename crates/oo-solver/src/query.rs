//! The exposed query surface.
//!
//! `TypeEngine` is a short-lived struct a driver builds once per analysis
//! pass (or once per worker thread, since the calculator's cache is not
//! shared) bundling the intern table, hierarchy oracle, library
//! spec service, options, and an `AstAdapter` implementation.

use crate::ast::{AstAdapter, AstNodeKind, TypeBinding};
use crate::calculator::{CalculationMode, TypeCalculator};
use crate::capture;
use crate::hierarchy::HierarchyOracle;
use crate::ids::{ClassHash, TypeIndex};
use crate::intern::TypeInterner;
use crate::library::LibrarySpecService;
use crate::types::TypeInfo;
use oo_common::{EngineOptions, TokenRange};

pub struct TypeEngine<'a, A: AstAdapter> {
    pub ast: &'a A,
    calculator: TypeCalculator<'a>,
}

impl<'a, A: AstAdapter> TypeEngine<'a, A> {
    pub fn new(
        ast: &'a A,
        interner: &'a TypeInterner,
        oracle: &'a dyn HierarchyOracle,
        library: &'a dyn LibrarySpecService,
        options: &'a EngineOptions,
    ) -> Self {
        TypeEngine {
            ast,
            calculator: TypeCalculator::new(interner, oracle, library, options),
        }
    }

    /// The main entry point: resolve the type of an AST node.
    /// If the node sits inside a return statement and the direct attempt
    /// yields nothing, retry against the enclosing method's declared return
    /// type.
    pub fn type_of(&self, node: A::Node, soft: bool) -> Option<TypeInfo> {
        let mode = CalculationMode::from_soft_flag(soft);
        if let Some(result) = self.type_of_node_binding(node, mode) {
            return Some(result);
        }

        let return_stmt = self.ast.find_nearest_ancestor(node, AstNodeKind::ReturnStatement)?;
        let method_decl = self.ast.find_nearest_ancestor(return_stmt, AstNodeKind::MethodDeclaration)?;
        self.type_of_node_binding(method_decl, mode)
    }

    fn type_of_node_binding(&self, node: A::Node, mode: CalculationMode) -> Option<TypeInfo> {
        let binding = self.ast.binding_of_node(node)?;
        self.calculator.type_of_binding(binding.as_ref(), None, mode)
    }

    /// Resolve the type of a calling-context expression, using the
    /// per-instance LRU keyed by `text` with the local-scope check. `text`
    /// is the driver-supplied textual form of `expr`.
    pub fn calling_context_type(&mut self, expr: A::Node, text: &str, soft: bool) -> Option<TypeInfo> {
        let querying_range = Some(self.ast.token_range_of_node(expr));
        if let Some(cached) = self.calculator.cache().get(text, querying_range) {
            return Some(cached);
        }

        let mode = CalculationMode::from_soft_flag(soft);
        let result = self.type_of_node_binding(expr, mode)?;
        let scope = self.ast.local_variable_scope(expr);
        self.calculator.cache().insert(text.to_string(), result.clone(), scope);
        Some(result)
    }

    /// Resolve the type of an opaque front-end `TypeBinding`.
    /// `file_path`/`token_range` are accepted for API fidelity with the
    /// front end's addressing scheme even though this engine does not
    /// itself interpret them beyond what `class_hash` already encodes.
    pub fn type_of_binding(
        &self,
        binding: &dyn TypeBinding,
        _file_path: &str,
        _token_range: Option<TokenRange>,
        class_hash: Option<ClassHash>,
        soft: bool,
    ) -> Option<TypeInfo> {
        self.calculator.type_of_binding(binding, class_hash, CalculationMode::from_soft_flag(soft))
    }

    /// Resolve the type of an AST type-reference node. Type
    /// nodes and expression/declaration nodes share the same `Node`
    /// addressing scheme in `AstAdapter`, so this is a thin wrapper that
    /// also tries the library-qualified-name fallback when the front end
    /// could not bind the node at all.
    pub fn type_of_ast_type(&self, type_node: A::Node, _file_path: &str, soft: bool) -> Option<TypeInfo> {
        self.type_of_node_binding(type_node, CalculationMode::from_soft_flag(soft))
    }

    /// Library-method resolution: resolve a method
    /// invocation's declaring type + method name to its declared return
    /// type text via the library spec service, trying package candidates
    /// in the documented order (default package, then the supplied import
    /// candidates, then the spec service's own name-to-packages map).
    pub fn qualified_name_of(
        &self,
        class_short_name: &str,
        method_name: &str,
        arity: usize,
        import_candidates: &[String],
    ) -> Option<String> {
        let mut packages: Vec<String> = Vec::new();
        packages.push(String::new());
        packages.extend(import_candidates.iter().cloned());
        for package in self.calculator.library.packages_for(class_short_name) {
            if !packages.contains(&package) {
                packages.push(package);
            }
        }

        for package in &packages {
            if let Some(spec) = self.calculator.library.spec_for(package, class_short_name, method_name, arity) {
                return Some(spec.return_type);
            }
        }
        tracing::trace!(class_short_name, method_name, arity, packages_tried = packages.len(), "library spec miss");
        None
    }

    /// The dense `TypeIndex` behind a `TypeInfo`.
    pub fn class_hash_index_of(&self, type_info: &TypeInfo) -> TypeIndex {
        type_info.index()
    }

    /// Resolve a symbolic inside `symbolic_bearing_type` against the actual
    /// container type, optionally seeded with a known declared container
    /// hash or type.
    pub fn replacement_for_symbolic(
        &self,
        symbolic_bearing_type: &TypeInfo,
        actual_container_type: &TypeInfo,
        declared_container_hash: Option<&ClassHash>,
        declared_container_type: Option<&TypeInfo>,
    ) -> Option<TypeInfo> {
        let resolved_declared;
        let declared = match declared_container_type {
            Some(t) => Some(t),
            None => {
                resolved_declared = declared_container_hash.and_then(|hash| self.calculator.oracle.proper_type_from_class_id(hash));
                resolved_declared.as_ref()
            }
        };
        capture::replacement_for_symbolic(
            symbolic_bearing_type,
            actual_container_type,
            declared,
            self.calculator.interner,
            self.calculator.oracle,
        )
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
