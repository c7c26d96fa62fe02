//! Scalar widening table.

use oo_common::EngineOptions;

const WIDENING_TABLE: &[(&str, &[&str])] = &[
    ("byte", &["short", "int", "long", "float", "double"]),
    ("short", &["int", "long", "float", "double"]),
    ("int", &["long", "float", "double"]),
    ("long", &["float", "double"]),
    ("float", &["double"]),
];

/// `char -> int/long/float/double` is intentionally absent from the base
/// table; an implementation may expose it as a configurable
/// option, which `EngineOptions::allow_char_numeric_widening` does.
const CHAR_WIDENING_TARGETS: &[&str] = &["int", "long", "float", "double"];

/// `Scalar(from).matches(Scalar(to))` auto-widening check, independent of
/// the `from == to` identity case.
pub fn auto_widens(from: &str, to: &str, options: &EngineOptions) -> bool {
    for (src, targets) in WIDENING_TABLE {
        if *src == from {
            return targets.contains(&to);
        }
    }
    if options.allow_char_numeric_widening && from == "char" {
        return CHAR_WIDENING_TARGETS.contains(&to);
    }
    false
}

#[cfg(test)]
#[path = "tests/widening_tests.rs"]
mod tests;
