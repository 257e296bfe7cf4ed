//! Check operation - run the pipeline and collect diagnostics.

use std::path::PathBuf;

use leafwise_schema::{DocumentMeta, ModuleFilter, Pipeline, Severity};
use leafwise_tree::EntryTree;

use super::{diagnostic_message, selected_modules};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Fatal pipeline errors are reported as error messages rather than returned.
pub fn check(tree: &EntryTree, files: &[PathBuf], filter: ModuleFilter) -> CheckReport {
    let mut report = CheckReport {
        files: files.to_vec(),
        modules: selected_modules(tree, &filter),
        errors: Vec::new(),
        warnings: Vec::new(),
        infos: Vec::new(),
        path_count: 0,
        config_path_count: 0,
        property_count: 0,
    };

    let mut ctx = match Pipeline::new().run(tree, filter, DocumentMeta::default()) {
        Ok(ctx) => ctx,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };

    for diag in &ctx.diagnostics {
        let msg = diagnostic_message(diag);
        match diag.severity {
            Severity::Error => report.errors.push(msg),
            Severity::Warning => report.warnings.push(msg),
            Severity::Info => report.infos.push(msg),
        }
    }

    if let Some(indices) = &ctx.indices {
        report.path_count = indices.all.len();
        report.config_path_count = indices.config.len();
    }
    if let Ok(document) = ctx.take_document() {
        report.property_count = document.node_count();
    }
    report
}
