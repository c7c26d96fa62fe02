//! Identifiers used throughout the type engine.

use serde::Serialize;
use std::sync::Arc;

/// A deterministic fingerprint of a concrete class/enum/interface
/// declaration, built by the external AST adapter from (file path, offset,
/// length, short name, kind). Stable for the lifetime of one analysis.
///
/// Three special forms:
/// - A *library* hash is the string `LIB::<fully-qualified-name>`.
/// - A *wildcard* hash is the literal `?`.
/// - A *symbolic* hash is the bare name of the type variable.
pub type ClassHash = Arc<str>;

/// Two-character delimiter used by the `LIB::` prefix and by opaque class
/// signatures.
pub const LIB_DELIM: &str = "::";
/// Prefix marking a `ClassHash` as referring to a library (non-source) type.
pub const LIB_PREFIX: &str = "LIB::";
/// The literal hash used for wildcard types.
pub const WILDCARD_HASH: &str = "?";
/// Canonical short name for the universal root type ("Object").
pub const OBJECT_NAME: &str = "Object";
/// Canonical short name for the root enum supertype.
pub const ENUM_ROOT_NAME: &str = "Enum";

/// Build a library `ClassHash` from a fully-qualified name.
pub fn library_hash(fully_qualified_name: &str) -> ClassHash {
    Arc::from(format!("{LIB_PREFIX}{fully_qualified_name}"))
}

/// Whether a `ClassHash` is a library hash.
pub fn is_library_hash(hash: &str) -> bool {
    hash.starts_with(LIB_PREFIX)
}

/// Strip the `LIB::` prefix, if present.
pub fn strip_library_prefix(hash: &str) -> &str {
    hash.strip_prefix(LIB_PREFIX).unwrap_or(hash)
}

/// A dense integer assigned to each known `ClassHash` by the hierarchy
/// oracle. Owned and produced by the external oracle, not by this crate;
/// modeled here only so adapter trait signatures can name it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BitIndex(pub u32);

/// A dense integer assigned by the intern table to each unique `TypeKey`
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeIndex(pub u32);

impl TypeIndex {
    pub const INVALID: TypeIndex = TypeIndex(u32::MAX);
}

impl std::fmt::Display for TypeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
