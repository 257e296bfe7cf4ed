//! Path collection and JSON Schema construction for leafwise.
//!
//! Turns an [`EntryTree`](leafwise_tree::EntryTree) into a [`SchemaDocument`]:
//!
//! ```text
//! EntryTree → collect → PathIndices { all, config } → SchemaBuilder → SchemaDocument
//! ```
//!
//! The [`pipeline`] module wraps these steps in phases that record
//! diagnostics along the way.

mod builder;
mod collect;
mod document;
mod error;
mod filter;
mod index;
mod node;
pub mod pipeline;
pub mod resolve;

pub use builder::{BUILD_PHASE, SchemaBuilder, build};
pub use collect::{PathCollector, collect};
pub use document::{
    DEFAULT_DESCRIPTION, DEFAULT_ID, DEFAULT_SCHEMA, DEFAULT_TITLE, DocumentMeta, SchemaDocument,
};
pub use error::{Error, Result};
pub use filter::ModuleFilter;
pub use index::{ConfigIndex, PathIndex, PathIndices, segments};
pub use node::{ScalarType, SchemaNode};
pub use pipeline::{Diagnostic, Pipeline, SchemaContext, Severity};
