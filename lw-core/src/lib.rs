//! Core utilities and types for the leafwise schema converter.
//!
//! This crate provides fundamental types and utilities shared by the
//! entry tree loader, the schema builder, and the CLI.

mod file;
mod type_kind;
mod types;
mod utils;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Fundamental types
pub use type_kind::TypeKind;
pub use types::NodeKind;
// Path utilities
pub use utils::{local_name, split_qualified, strip_predicates};
