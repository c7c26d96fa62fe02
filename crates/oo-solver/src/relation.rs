//! The matches/covers compatibility relation.
//!
//! `matches` is queried from an invocation value toward a declaration slot;
//! `covers` is the same relation queried from the declaration side. They
//! are duals of the exact same underlying compatibility relation, so both
//! are thin, differently-named wrappers around one `is_compatible` that
//! handles each variant pair exactly once.

use crate::hierarchy::HierarchyOracle;
use crate::ids::{ENUM_ROOT_NAME, OBJECT_NAME};
use crate::types::{TypeInfo, TypeKey};
use crate::widening;
use oo_common::EngineOptions;

/// Bundles the two pieces of external state the relation needs: the
/// hierarchy oracle for subtype checks and the engine options for the
/// scalar-widening table's optional `char` extension.
pub struct RelationContext<'a> {
    pub oracle: &'a dyn HierarchyOracle,
    pub options: &'a EngineOptions,
}

/// `invocation.matches(declaration)`.
pub fn matches(invocation: &TypeInfo, declaration: &TypeInfo, ctx: &RelationContext) -> bool {
    is_compatible(invocation, declaration, ctx)
}

/// `declaration.covers(invocation)`.
pub fn covers(declaration: &TypeInfo, invocation: &TypeInfo, ctx: &RelationContext) -> bool {
    is_compatible(invocation, declaration, ctx)
}

fn erasure_compatible(inv: &TypeInfo, decl: &TypeInfo, oracle: &dyn HierarchyOracle) -> bool {
    let inv_erasure = inv.type_erasure();
    let decl_erasure = decl.type_erasure();
    inv_erasure == decl_erasure || oracle.is_transitive_supertype(&decl_erasure, &inv_erasure)
}

fn is_compatible(inv: &TypeInfo, decl: &TypeInfo, ctx: &RelationContext) -> bool {
    // Universal coverage: Object accepts everything.
    if is_universal_object(decl) {
        return true;
    }
    // The abstract Enum supertype accepts any enum-shaped invocation.
    if is_enum_root(decl) && inv.is_enum() {
        return true;
    }

    // Same-shape pairs that are computed directly rather than delegated.
    match (inv.key(), decl.key()) {
        (TypeKey::Scalar(a), TypeKey::Scalar(b)) => {
            a.name == b.name || widening::auto_widens(&a.name, &b.name, ctx.options)
        }
        (TypeKey::Array(a), TypeKey::Array(b)) => {
            a.dimension == b.dimension && erasure_compatible(&a.element, &b.element, ctx.oracle)
        }
        (TypeKey::Symbolic(_), TypeKey::Symbolic(_)) => erasure_compatible(inv, decl, ctx.oracle),
        (TypeKey::Wildcard(_), TypeKey::Wildcard(_)) => erasure_compatible(inv, decl, ctx.oracle),
        (TypeKey::Parameterized(_), TypeKey::Parameterized(_)) => {
            erasure_compatible(inv, decl, ctx.oracle)
        }
        _ => is_compatible_mixed(inv, decl, ctx),
    }
}

fn is_compatible_mixed(inv: &TypeInfo, decl: &TypeInfo, ctx: &RelationContext) -> bool {
    // Enums cannot be supertyped: nothing but an identical erasure satisfies
    // an Enum declaration.
    if decl.is_enum() {
        return inv.type_erasure() == decl.type_erasure();
    }

    // Wildcard/Symbolic declarations accept any invocation shape (Scalar,
    // Array, Class, Enum, Parameterized) via these delegation rows, so they
    // must be checked before the array-shape bail-out below.
    if let TypeKey::Wildcard(w) = decl.key() {
        return wildcard_covers(w, inv, ctx);
    }
    if let TypeKey::Symbolic(s) = decl.key() {
        return symbolic_covers(s, inv, ctx);
    }

    // Array only ever matches/covers another Array (Object and same-variant
    // cases are already handled above).
    if inv.is_array() != decl.is_array() {
        return false;
    }

    // Class, Parameterized, or a Symbolic/Wildcard invocation against a
    // plain Class/Parameterized declaration: erasure compatibility via the
    // hierarchy oracle is the only thing left to consult.
    erasure_compatible(inv, decl, ctx.oracle)
}

/// `Wildcard.covers(invocation)`.
fn wildcard_covers(
    w: &crate::types::WildcardType,
    invocation: &TypeInfo,
    ctx: &RelationContext,
) -> bool {
    match &w.bound {
        None => true,
        Some(bound) => {
            if w.is_upper {
                is_compatible(invocation, bound, ctx)
            } else {
                // Lower-bounded: the inverse direction.
                is_compatible(bound, invocation, ctx)
            }
        }
    }
}

/// `Symbolic.covers(invocation)`.
fn symbolic_covers(
    s: &crate::types::SymbolicType,
    invocation: &TypeInfo,
    ctx: &RelationContext,
) -> bool {
    match &s.bounds {
        None => true,
        Some(bounds) if bounds.len() == 1 && bounds[0].type_erasure().as_ref() == OBJECT_NAME => {
            true
        }
        Some(bounds) => bounds.iter().all(|bound| is_compatible(invocation, bound, ctx)),
    }
}

fn is_universal_object(t: &TypeInfo) -> bool {
    matches!(t.key(), TypeKey::Class(c) if c.class_hash.as_ref() == OBJECT_NAME)
}

fn is_enum_root(t: &TypeInfo) -> bool {
    matches!(t.key(), TypeKey::Class(c) if c.class_hash.as_ref() == ENUM_ROOT_NAME)
}

#[cfg(test)]
#[path = "tests/relation_tests.rs"]
mod tests;
