//! The AST adapter.
//!
//! Consumed only: AST construction happens in an external compiler
//! front-end. This module names the capabilities the
//! type calculator needs from that front-end's typed AST nodes and the type
//! bindings attached to them.

use oo_common::TokenRange;

/// An opaque front-end type binding. `None`/`false`/empty answers are
/// always valid and drive the calculator's fallback paths.
pub trait TypeBinding: std::fmt::Debug {
    fn is_primitive(&self) -> bool;

    fn is_array(&self) -> bool;
    /// Valid only when `is_array()`.
    fn element_type(&self) -> Option<Box<dyn TypeBinding>>;
    /// Valid only when `is_array()`.
    fn dimensions(&self) -> u32;

    fn is_parameterized_type(&self) -> bool;
    fn is_generic_type(&self) -> bool;
    fn is_raw_type(&self) -> bool;

    fn is_wildcard_type(&self) -> bool;
    /// Valid only when `is_wildcard_type()`.
    fn bound(&self) -> Option<Box<dyn TypeBinding>>;
    /// Valid only when `is_wildcard_type()`.
    fn is_upper_bound(&self) -> bool;

    fn is_type_variable(&self) -> bool;
    /// Valid only when `is_type_variable()`. Declaration order; first entry
    /// is the erasure-determining bound.
    fn type_bounds(&self) -> Vec<Box<dyn TypeBinding>>;

    fn is_capture(&self) -> bool;
    /// Valid only when `is_capture()`.
    fn erasure(&self) -> Option<Box<dyn TypeBinding>>;

    fn is_enum(&self) -> bool;
    fn is_interface(&self) -> bool;
    fn is_nested(&self) -> bool;
    fn is_from_source(&self) -> bool;
    /// True when the front-end could only partially resolve this binding.
    fn is_recovered(&self) -> bool;

    fn name(&self) -> String;
    fn qualified_name(&self) -> Option<String>;

    fn type_arguments(&self) -> Vec<Box<dyn TypeBinding>>;
    fn type_parameters(&self) -> Vec<Box<dyn TypeBinding>>;
    fn interfaces(&self) -> Vec<Box<dyn TypeBinding>>;
    fn superclass(&self) -> Option<Box<dyn TypeBinding>>;
    fn declaring_class(&self) -> Option<Box<dyn TypeBinding>>;

    /// A source-range-recoverable handle to the underlying declaration, if
    /// the binding came from source.
    fn source_element(&self) -> Option<TokenRange>;
}

/// Coarse classification used by `find_nearest_ancestor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AstNodeKind {
    MethodDeclaration,
    ReturnStatement,
    VariableDeclaration,
    Assignment,
    ClassCreation,
    AnonymousClassDeclaration,
    Statement,
}

/// The external AST front-end's query surface, as consumed by the type
/// calculator.
pub trait AstAdapter {
    type Node: Copy;
    type CompilationUnit: Copy;

    fn find_nearest_ancestor(&self, node: Self::Node, kind: AstNodeKind) -> Option<Self::Node>;
    fn file_path_of_compilation_unit(&self, cu: Self::CompilationUnit) -> String;
    fn local_variable_scope(&self, expr: Self::Node) -> Option<TokenRange>;
    fn token_range_of_node(&self, node: Self::Node) -> TokenRange;
    fn binding_of_node(&self, node: Self::Node) -> Option<Box<dyn TypeBinding>>;
    fn compilation_unit_of(&self, node: Self::Node) -> Self::CompilationUnit;
}
