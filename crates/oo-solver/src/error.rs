//! Fatal-error handling.
//!
//! The engine never surfaces an error to the caller for ordinary
//! resolution misses on user-visible input — those are `None`/`false`.
//! The only thing that aborts is a violated internal invariant, which
//! means this crate (or its adapters) has a bug. That is modeled here
//! rather than threaded through every `Result`, enforcing internal
//! invariants with `assert!` instead.

use std::fmt;

/// A violated internal invariant. Carries enough context to
/// diagnose which descriptor broke the contract.
#[derive(Debug)]
pub struct InvariantViolation {
    pub what: &'static str,
    pub detail: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type engine invariant violated ({}): {}", self.what, self.detail)
    }
}

impl std::error::Error for InvariantViolation {}

/// Abort immediately on a broken invariant. Programming bugs, not user
/// input, trigger this path.
#[track_caller]
pub fn abort_on_invariant_violation(what: &'static str, detail: impl Into<String>) -> ! {
    let violation = InvariantViolation {
        what,
        detail: detail.into(),
    };
    panic!("{violation}");
}

/// Assert an internal invariant, aborting with context on failure.
macro_rules! assert_invariant {
    ($cond:expr, $what:expr, $($detail:tt)*) => {
        if !($cond) {
            $crate::error::abort_on_invariant_violation($what, format!($($detail)*));
        }
    };
}

pub(crate) use assert_invariant;
