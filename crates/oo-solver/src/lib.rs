//! Whole-program type-representation and type-resolution engine.
//!
//! The crate is organized around one intern table (`intern`) holding every
//! `TypeKey` descriptor ever constructed during an analysis, a handful of
//! pure relations over those descriptors (`erasure`, `widening`,
//! `relation`), the capture/substitute algorithm that resolves generics
//! (`capture`), a per-context cache wrapping that algorithm (`calculator`),
//! and the external adapter traits a driver implements to plug in its own
//! AST and class hierarchy (`ast`, `hierarchy`, `library`). `query` ties all
//! of the above into the public surface a driver actually calls.

pub mod ast;
pub mod calculator;
pub mod capture;
pub mod erasure;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod intern;
pub mod library;
pub mod query;
pub mod relation;
pub mod types;
pub mod widening;

/// Shared fixtures also reachable from integration tests via the
/// `test-util` feature, so `tests/` does not need its own copy of
/// `MapHierarchyOracle`.
#[cfg(any(test, feature = "test-util"))]
pub mod test_support;

pub use error::{InvariantViolation, abort_on_invariant_violation};
pub use hierarchy::{EmptyHierarchyOracle, HierarchyOracle, OpaqueBinding};
pub use ids::{BitIndex, ClassHash, TypeIndex};
pub use intern::TypeInterner;
pub use library::{EmptyLibrarySpecService, LibraryMethodSpec, LibrarySpecService};
pub use query::TypeEngine;
pub use relation::{RelationContext, covers, matches};
pub use types::{
    ArgList, ArrayType, BoundList, ClassType, EnumType, FieldEntry, FieldMap, ParameterizedType,
    ScalarType, SymbolicType, TypeInfo, TypeKey, WildcardType,
};

pub use oo_common::EngineOptions;
