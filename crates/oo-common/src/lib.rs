//! Common types shared across the call-graph type-resolution engine.
//!
//! This crate provides the foundational pieces that both the solver and its
//! external collaborators (AST front-end, hierarchy oracle, library spec
//! service) need to agree on:
//! - Source locations (`TokenRange`)
//! - Engine-wide tunables (`EngineOptions`)

pub mod options;
pub mod span;

pub use options::EngineOptions;
pub use span::TokenRange;
