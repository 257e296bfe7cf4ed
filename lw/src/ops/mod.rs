//! Core operations.
//!
//! This module contains the business logic for lw commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod paths;

pub use check::check;
pub use generate::generate;
pub use paths::paths;

use leafwise_schema::ModuleFilter;
use leafwise_tree::EntryTree;

/// Names of the loaded modules the filter keeps.
fn selected_modules(tree: &EntryTree, filter: &ModuleFilter) -> Vec<String> {
    tree.list_modules()
        .filter(|m| filter.includes(m))
        .map(str::to_string)
        .collect()
}

/// A diagnostic message with its location on a second line.
fn diagnostic_message(diag: &leafwise_schema::Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
