//! Capture and substitute engine.
//!
//! `parse_and_map_symbols` walks a declared generic shape against a
//! concrete target shape, capturing what each type variable / wildcard
//! resolves to; `replace_symbol` walks a (possibly unrelated) type that
//! mentions those same symbols and produces its concrete form.

use crate::erasure::{canonicalize_names, sets_match};
use crate::hierarchy::HierarchyOracle;
use crate::ids::{ClassHash, TypeIndex};
use crate::intern::TypeInterner;
use crate::types::{TypeInfo, TypeKey};
use std::collections::{HashMap, HashSet, VecDeque};

/// One step of the traversal breadcrumb: the container descriptor entered,
/// plus the positional code (argument index) descended through since
/// entering it. Since every recursion into a new argument
/// either continues inside the same container (array element) or pushes a
/// fresh frame (parameterized argument), a frame's code is always a single
/// index — the path naturally "truncates on entering a new container"
/// because a new container always starts a new frame.
pub type ContainerFrame = (TypeIndex, u32);

/// The traversal breadcrumb itself.
pub type Breadcrumb = Vec<ContainerFrame>;

/// Captured type-variable bindings, keyed by the `TypeIndex` of the
/// Symbolic occurrence in the *declared* shape.
pub type CapturedSymbols = HashMap<TypeIndex, TypeInfo>;
/// Captured wildcard bindings, keyed by the breadcrumb frame the wildcard
/// occupied — wildcards have no identity of their own, only a position.
pub type CapturedWildcards = HashMap<ContainerFrame, TypeInfo>;

/// Walk `declared` against `target`, populating `captured_syms` and
/// `captured_wilds`.
pub fn parse_and_map_symbols(
    declared: &TypeInfo,
    target: &TypeInfo,
    past_containers: &Breadcrumb,
    seen: &mut HashSet<ContainerFrame>,
    captured_syms: &mut CapturedSymbols,
    captured_wilds: &mut CapturedWildcards,
    oracle: &dyn HierarchyOracle,
) {
    match declared.key() {
        TypeKey::Class(_) | TypeKey::Enum(_) | TypeKey::Scalar(_) => {}

        TypeKey::Array(a) => {
            if let TypeKey::Array(ta) = target.key() {
                parse_and_map_symbols(
                    &a.element,
                    &ta.element,
                    past_containers,
                    seen,
                    captured_syms,
                    captured_wilds,
                    oracle,
                );
            }
        }

        TypeKey::Parameterized(p) => {
            if let TypeKey::Parameterized(tp) = target.key() {
                if p.arguments.len() == tp.arguments.len() && raw_hashes_align(&p.raw_class_hash, &tp.raw_class_hash, oracle) {
                    for (i, (arg, targ)) in p.arguments.iter().zip(tp.arguments.iter()).enumerate() {
                        let mut next = past_containers.clone();
                        next.push((declared.index(), i as u32));
                        parse_and_map_symbols(arg, targ, &next, seen, captured_syms, captured_wilds, oracle);
                    }
                }
            }
        }

        TypeKey::Symbolic(_) => {
            if !any_frame_seen(past_containers, seen) {
                captured_syms.insert(declared.index(), target.clone());
                mark_seen(past_containers, seen);
            }
        }

        TypeKey::Wildcard(_) => {
            if !any_frame_seen(past_containers, seen) {
                for frame in past_containers {
                    captured_wilds.insert(*frame, target.clone());
                }
                mark_seen(past_containers, seen);
            }
        }
    }
}

fn raw_hashes_align(self_raw: &ClassHash, target_raw: &ClassHash, oracle: &dyn HierarchyOracle) -> bool {
    if self_raw == target_raw {
        return true;
    }
    let self_names = canonicalize_names(self_raw, oracle);
    let target_names = canonicalize_names(target_raw, oracle);
    sets_match(&self_names, &target_names)
}

fn any_frame_seen(breadcrumb: &Breadcrumb, seen: &HashSet<ContainerFrame>) -> bool {
    breadcrumb.iter().any(|frame| seen.contains(frame))
}

fn mark_seen(breadcrumb: &Breadcrumb, seen: &mut HashSet<ContainerFrame>) {
    for frame in breadcrumb {
        seen.insert(*frame);
    }
}

/// Produce a concrete version of `self_type`.
/// Returns whether anything changed, and the (possibly identical) result.
pub fn replace_symbol(
    self_type: &TypeInfo,
    past_containers: &Breadcrumb,
    already_replaced: &mut HashSet<ContainerFrame>,
    captured_syms: &CapturedSymbols,
    captured_wilds: &CapturedWildcards,
    interner: &TypeInterner,
    oracle: &dyn HierarchyOracle,
) -> (bool, TypeInfo) {
    match self_type.key() {
        TypeKey::Class(_) | TypeKey::Enum(_) | TypeKey::Scalar(_) => (false, self_type.clone()),

        TypeKey::Array(a) => {
            if !self_type.needs_replacement() {
                return (false, self_type.clone());
            }
            let (changed, new_element) = replace_symbol(
                &a.element,
                past_containers,
                already_replaced,
                captured_syms,
                captured_wilds,
                interner,
                oracle,
            );
            if changed {
                (true, interner.array(a.dimension, new_element, a.is_var_args))
            } else {
                (false, self_type.clone())
            }
        }

        TypeKey::Parameterized(p) => {
            let mut any_changed = false;
            let mut new_args = p.arguments.clone();
            for (i, arg) in p.arguments.iter().enumerate() {
                let mut next = past_containers.clone();
                next.push((self_type.index(), i as u32));
                let (changed, new_arg) = replace_symbol(
                    arg,
                    &next,
                    already_replaced,
                    captured_syms,
                    captured_wilds,
                    interner,
                    oracle,
                );
                if changed {
                    new_args[i] = new_arg;
                    any_changed = true;
                }
            }
            if any_changed {
                (
                    true,
                    interner.parameterized(
                        p.raw_class_hash.clone(),
                        new_args.into_vec(),
                        p.from_source,
                        p.fields.clone(),
                        p.type_arg_to_field_name.clone(),
                        p.is_inner,
                    ),
                )
            } else {
                (false, self_type.clone())
            }
        }

        TypeKey::Symbolic(_) => {
            if any_frame_seen(past_containers, already_replaced) {
                return (false, self_type.clone());
            }
            match captured_syms.get(&self_type.index()) {
                Some(captured) => {
                    let result = resolve_captured_value(captured, interner, oracle);
                    mark_seen(past_containers, already_replaced);
                    (true, result)
                }
                None => (false, self_type.clone()),
            }
        }

        TypeKey::Wildcard(w) => {
            for frame in past_containers {
                if let Some(captured) = captured_wilds.get(frame) {
                    let result = resolve_captured_value(captured, interner, oracle);
                    already_replaced.insert(*frame);
                    return (true, result);
                }
            }
            if let Some(bound) = &w.bound {
                if let TypeKey::Symbolic(_) = bound.key() {
                    if let Some(sym_captured) = captured_syms.get(&bound.index()) {
                        return if w.is_upper {
                            (true, sym_captured.clone())
                        } else {
                            (true, interner.object_class())
                        };
                    }
                }
            }
            if w.is_upper {
                if let Some(bound) = &w.bound {
                    let is_concrete_class = matches!(bound.key(), TypeKey::Class(_));
                    let is_concrete_parameterized =
                        matches!(bound.key(), TypeKey::Parameterized(_)) && !bound.needs_replacement();
                    if is_concrete_class || is_concrete_parameterized {
                        return (true, bound.clone());
                    }
                }
            }
            (false, self_type.clone())
        }
    }
}

/// Post-process a captured value before handing it back from
/// `replace_symbol`: apply `bound_wildcard_or_symbolic`, then try to
/// upgrade to a richer oracle-backed representation, falling back to the
/// raw captured value if no richer form is available.
fn resolve_captured_value(captured: &TypeInfo, interner: &TypeInterner, oracle: &dyn HierarchyOracle) -> TypeInfo {
    if let TypeKey::Array(arr) = captured.key() {
        let bounded_elem = bound_wildcard_or_symbolic(&arr.element, interner);
        let resolved_elem = resolve_richer(&bounded_elem, oracle).unwrap_or(bounded_elem);
        return interner.array(arr.dimension, resolved_elem, arr.is_var_args);
    }
    let bounded = bound_wildcard_or_symbolic(captured, interner);
    resolve_richer(&bounded, oracle).unwrap_or_else(|| captured.clone())
}

fn resolve_richer(t: &TypeInfo, oracle: &dyn HierarchyOracle) -> Option<TypeInfo> {
    let hash = t.class_hash()?;
    oracle.proper_type_from_class_id(hash)
}

/// Collapse a Symbolic to its first bound, or a Wildcard to its bound,
/// leaving every other variant untouched.
pub fn bound_wildcard_or_symbolic(t: &TypeInfo, interner: &TypeInterner) -> TypeInfo {
    match t.key() {
        TypeKey::Symbolic(s) => match &s.bounds {
            Some(bounds) if !bounds.is_empty() => bounds[0].clone(),
            _ => t.clone(),
        },
        TypeKey::Wildcard(w) => match &w.bound {
            Some(bound) => bound.clone(),
            None => t.clone(),
        },
        TypeKey::Array(a) => {
            let new_element = bound_wildcard_or_symbolic(&a.element, interner);
            if new_element != a.element {
                interner.array(a.dimension, new_element, a.is_var_args)
            } else {
                t.clone()
            }
        }
        TypeKey::Parameterized(p) => {
            let new_args: Vec<TypeInfo> = p.arguments.iter().map(|arg| bound_wildcard_or_symbolic(arg, interner)).collect();
            if new_args.as_slice() != p.arguments.as_slice() {
                interner.parameterized(
                    p.raw_class_hash.clone(),
                    new_args,
                    p.from_source,
                    p.fields.clone(),
                    p.type_arg_to_field_name.clone(),
                    p.is_inner,
                )
            } else {
                t.clone()
            }
        }
        TypeKey::Class(_) | TypeKey::Enum(_) | TypeKey::Scalar(_) => t.clone(),
    }
}

/// The symbolic-replacement helper: resolve a symbolic
/// inside `symbolic_bearing_type` given the actual (invocation-site) type
/// of its container and, optionally, the declared container type it was
/// originally declared against.
pub fn replacement_for_symbolic(
    symbolic_bearing_type: &TypeInfo,
    actual_container_type: &TypeInfo,
    declared_container_type: Option<&TypeInfo>,
    interner: &TypeInterner,
    oracle: &dyn HierarchyOracle,
) -> Option<TypeInfo> {
    if let Some(declared) = declared_container_type {
        if let Some(result) =
            try_capture_and_replace(symbolic_bearing_type, actual_container_type, declared, interner, oracle)
        {
            return Some(result);
        }
    }

    let actual_hash = actual_container_type.class_hash()?.clone();
    let mut queue: VecDeque<ClassHash> = VecDeque::new();
    let mut visited: HashSet<ClassHash> = HashSet::new();
    if let Some(superclass) = oracle.superclass_of(&actual_hash) {
        queue.push_back(superclass);
    }
    for iface in oracle.interfaces_of(&actual_hash) {
        queue.push_back(iface);
    }

    while let Some(candidate_hash) = queue.pop_front() {
        if !visited.insert(candidate_hash.clone()) {
            continue;
        }
        let candidate_type = oracle
            .proper_type_from_class_id(&candidate_hash)
            .or_else(|| oracle.soft_type_from_class_id(&candidate_hash));
        if let Some(candidate_type) = candidate_type {
            if let Some(result) = try_capture_and_replace(
                symbolic_bearing_type,
                actual_container_type,
                &candidate_type,
                interner,
                oracle,
            ) {
                return Some(result);
            }
        }
        if let Some(superclass) = oracle.superclass_of(&candidate_hash) {
            queue.push_back(superclass);
        }
        for iface in oracle.interfaces_of(&candidate_hash) {
            queue.push_back(iface);
        }
    }

    tracing::trace!(
        hashes_visited = visited.len(),
        "hierarchy oracle walk exhausted with no symbolic capture"
    );
    None
}

fn try_capture_and_replace(
    symbolic_bearing_type: &TypeInfo,
    actual: &TypeInfo,
    declared: &TypeInfo,
    interner: &TypeInterner,
    oracle: &dyn HierarchyOracle,
) -> Option<TypeInfo> {
    let mut seen = HashSet::new();
    let mut captured_syms = HashMap::new();
    let mut captured_wilds = HashMap::new();
    parse_and_map_symbols(
        declared,
        actual,
        &Breadcrumb::new(),
        &mut seen,
        &mut captured_syms,
        &mut captured_wilds,
        oracle,
    );
    if captured_syms.is_empty() && captured_wilds.is_empty() {
        return None;
    }
    let mut already_replaced = HashSet::new();
    let (changed, result) = replace_symbol(
        symbolic_bearing_type,
        &Breadcrumb::new(),
        &mut already_replaced,
        &captured_syms,
        &captured_wilds,
        interner,
        oracle,
    );
    changed.then_some(result)
}

#[cfg(test)]
#[path = "tests/capture_tests.rs"]
mod tests;
