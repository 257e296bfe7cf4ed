//! Generate operation - build and write the schema document.

use std::path::Path;

use eyre::{Context, Result};
use leafwise_core::{File, Overwrite, WriteResult};
use leafwise_schema::{DocumentMeta, ModuleFilter, Pipeline};
use leafwise_tree::EntryTree;

use super::{diagnostic_message, selected_modules};
use crate::reports::{GenerateReport, GenerateResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub filter: ModuleFilter,
    pub meta: DocumentMeta,
    pub outfile: &'a Path,
    /// Render the document instead of writing it.
    pub dry_run: bool,
    /// Keep an existing output file.
    pub no_clobber: bool,
}

/// Execute the generate operation.
pub fn generate(tree: &EntryTree, opts: GenerateOptions) -> Result<GenerateReport> {
    let modules = selected_modules(tree, &opts.filter);

    let mut ctx = Pipeline::new()
        .run(tree, opts.filter, opts.meta)
        .wrap_err("Schema generation failed")?;

    if ctx.has_errors() {
        let errors: Vec<String> = ctx.errors().map(diagnostic_message).collect();
        eyre::bail!("Schema generation failed:\n{}", errors.join("\n"));
    }

    let warnings = ctx.warnings().map(diagnostic_message).collect();
    let document = ctx.take_document()?;
    let content = document
        .to_json_pretty()
        .wrap_err("Failed to serialize schema")?;
    let property_count = document.node_count();
    let path = opts.outfile.to_path_buf();

    let result = if opts.dry_run {
        GenerateResult::Preview { path, content }
    } else {
        let overwrite = if opts.no_clobber {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        };
        let written = File::new(&path, content)
            .overwrite(overwrite)
            .write()
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        match written {
            WriteResult::Written => GenerateResult::Written { path },
            WriteResult::Skipped => GenerateResult::Skipped { path },
        }
    };

    Ok(GenerateReport {
        modules,
        warnings,
        property_count,
        result,
    })
}
