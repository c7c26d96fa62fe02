//! Erasure and name canonicalization.

use crate::hierarchy::HierarchyOracle;
use crate::ids::{ClassHash, OBJECT_NAME, strip_library_prefix};
use crate::types::TypeKey;
use std::collections::HashSet;
use std::sync::Arc;

impl TypeKey {
    /// The raw name used for runtime type checks, with generic information
    /// stripped.
    pub fn type_erasure(&self) -> Arc<str> {
        match self {
            TypeKey::Scalar(s) => s.name.clone(),
            TypeKey::Class(c) => c.class_hash.clone(),
            TypeKey::Enum(e) => e.class_hash.clone(),
            TypeKey::Parameterized(p) => p.raw_class_hash.clone(),
            TypeKey::Array(a) => a.element.type_erasure(),
            TypeKey::Symbolic(s) => match &s.bounds {
                Some(bounds) if !bounds.is_empty() => bounds[0].type_erasure(),
                _ => Arc::from(OBJECT_NAME),
            },
            TypeKey::Wildcard(w) => {
                if w.is_upper {
                    match &w.bound {
                        Some(b) => b.type_erasure(),
                        None => Arc::from(OBJECT_NAME),
                    }
                } else {
                    // Lower-bounded wildcards do not change erasure.
                    Arc::from(OBJECT_NAME)
                }
            }
        }
    }
}

/// Canonicalize a declared short name plus every known supertype/interface
/// short name from the hierarchy oracle into the set of names usable for
/// matching across source/library and qualified/unqualified forms.
pub fn canonicalize_names(class_hash: &ClassHash, oracle: &dyn HierarchyOracle) -> HashSet<Arc<str>> {
    let mut raw: HashSet<Arc<str>> = HashSet::new();
    raw.insert(class_hash.clone());
    for supertype in oracle.all_supertypes(class_hash) {
        raw.insert(supertype);
    }

    raw.into_iter()
        .map(|name| {
            let stripped = strip_library_prefix(&name);
            let short = drop_package_prefix(stripped);
            Arc::from(short)
        })
        .collect()
}

/// The bare short name for a `ClassHash`: library prefix and package both
/// stripped.
pub fn raw_short_name(class_hash: &str) -> &str {
    drop_package_prefix(strip_library_prefix(class_hash))
}

/// Drop the leading package (text up to the final `.`), if present.
fn drop_package_prefix(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Two names "match" when either both are unqualified and string-equal, or
/// one is qualified and its last dotted segment equals the other.
pub fn names_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    drop_package_prefix(a) == drop_package_prefix(b)
}

/// Two canonicalization sets "match" when their intersection is non-empty.
pub fn sets_match(a: &HashSet<Arc<str>>, b: &HashSet<Arc<str>>) -> bool {
    for name_a in a {
        for name_b in b {
            if names_match(name_a, name_b) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "tests/erasure_tests.rs"]
mod tests;
