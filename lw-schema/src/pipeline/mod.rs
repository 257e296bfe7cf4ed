//! Schema generation pipeline.
//!
//! A [`Pipeline`] runs the phases that turn an entry tree into a schema
//! document over a shared [`SchemaContext`]:
//!
//! - `collect`: walk the selected modules and build both path indices
//! - `build`: create schema nodes for every configuration path
//!
//! Phases report fatal problems as errors and everything else as
//! [`Diagnostic`]s on the context.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::SchemaContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
