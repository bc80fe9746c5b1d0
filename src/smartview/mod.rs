//! Smartview rule compilation and serialization.

pub mod compiler;
pub mod document;
pub mod rule;
pub mod writer;

pub use compiler::{compile, ViewLabel, ViewRules};
pub use document::{CompiledDocument, CompiledView, Provenance, DEFAULT_SET_TITLE};
pub use rule::{Action, CompiledRule, ConditionKind, Rgba, Threshold};
pub use writer::{render, write_smartview, FILE_EXTENSION};
