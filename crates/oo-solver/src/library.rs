//! The library-type spec service.
//!
//! Spec-file loading for third-party libraries is out of scope here — only
//! the interface the type calculator needs is defined. A real driver loads
//! per-library spec files (the analog of TypeScript's `.d.ts`) and answers
//! these queries from them.

use std::collections::HashSet;

/// The resolved signature of a library method invocation, as far as the
/// type calculator needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryMethodSpec {
    pub package: String,
    pub declaring_type: String,
    pub method_name: String,
    /// The textual, not-yet-resolved return type as written in the spec
    /// file (e.g. `"List<T>"`, `"java.lang.String"`). The calculator is
    /// responsible for turning this into a `TypeInfo`.
    pub return_type: String,
}

pub trait LibrarySpecService: Send + Sync {
    /// Every package a short class name could plausibly belong to.
    fn packages_for(&self, short_class_name: &str) -> HashSet<String>;

    /// Resolve `(package, class, method, arity)` to a method spec, if the
    /// library defines such a method.
    fn spec_for(
        &self,
        package: &str,
        class: &str,
        method: &str,
        arity: usize,
    ) -> Option<LibraryMethodSpec>;
}

/// A spec service with no registered libraries. Every lookup misses, which
/// sends the calculator back to its textual heuristics.
pub struct EmptyLibrarySpecService;

impl LibrarySpecService for EmptyLibrarySpecService {
    fn packages_for(&self, _short_class_name: &str) -> HashSet<String> {
        HashSet::new()
    }
    fn spec_for(
        &self,
        _package: &str,
        _class: &str,
        _method: &str,
        _arity: usize,
    ) -> Option<LibraryMethodSpec> {
        None
    }
}
