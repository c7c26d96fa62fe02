//! Engine-wide configuration for the type-resolution engine.
//!
//! Lives in `oo-common` so that both the solver and any downstream crate
//! (call-graph construction, CLI) can reference `EngineOptions` without a
//! circular dependency.

/// Tunable behavior of the type engine. None of these affect the shape of
/// `TypeInfo` itself; they only affect a handful of deliberately
/// conservative defaults called out by the design (see the widening table).
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// When true, `char` is allowed to widen to the integral/floating scalar
    /// types during `matches`. The reference behavior leaves this off: the
    /// source widening table never promotes `char`, which is a deliberate
    /// narrowing of scope rather than an oversight.
    pub allow_char_numeric_widening: bool,
    /// Maximum entries retained in a single type calculator's calling-context
    /// cache before the least-recently-used entry is evicted.
    pub calculator_cache_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            allow_char_numeric_widening: false,
            calculator_cache_capacity: 2048,
        }
    }
}
