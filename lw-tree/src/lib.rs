//! Entry tree model and module loader for leafwise.
//!
//! The entry tree is the read-only input of schema generation: a set of
//! module roots whose descendants carry kinds, resolved types, read-only
//! flags and augmentation records.
//!
//! ```text
//! module files (TOML) → Modules (parse) → Modules::process → EntryTree
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod entry;
mod error;
mod modules;
mod source;
mod tree;
mod validate;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use entry::{Entry, EntryId, Identity, IdentityBase, TypeDesc};
pub use error::{Error, Result, SourceContext};
pub use modules::Modules;
pub use tree::{EntryTree, ModuleInfo};
