//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from schema generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Modules that contributed to the document.
    pub modules: Vec<String>,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Number of properties in the document, nested ones included.
    pub property_count: usize,
    pub result: GenerateResult,
}

/// What happened to the document.
#[derive(Debug)]
pub enum GenerateResult {
    Written { path: PathBuf },
    /// The output file existed and replacing it was not allowed.
    Skipped { path: PathBuf },
    /// Dry run: the document that would have been written.
    Preview { path: PathBuf, content: String },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerateResult::Preview { path, content } => {
                out.divider(&path.display().to_string());
                out.preformatted(content.trim_end());
                out.divider("Summary");
                out.preformatted(&format!(
                    "{} properties from {} would be written",
                    self.property_count,
                    plural(self.modules.len(), "module")
                ));
            }
            GenerateResult::Written { path } => {
                self.render_modules(out);
                out.key_value("Properties", &self.property_count.to_string());
                out.key_value("Generated", &path.display().to_string());
            }
            GenerateResult::Skipped { path } => {
                self.render_modules(out);
                out.key_value(
                    "Skipped",
                    &format!("{} (already exists)", path.display()),
                );
            }
        }
    }
}

impl GenerateReport {
    fn render_modules(&self, out: &mut dyn Output) {
        out.section(&format!("Modules ({})", self.modules.len()));
        for module in &self.modules {
            out.list_item(module);
        }
        out.newline();
    }
}

pub(super) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            modules: vec!["openconfig-interfaces".into()],
            warnings: vec!["leafref '../x' does not resolve to a leaf (at /m:a/b)".into()],
            property_count: 12,
            result: GenerateResult::Written {
                path: PathBuf::from("schema.json"),
            },
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "warning: leafref '../x' does not resolve to a leaf (at /m:a/b)",
                "Modules (1):",
                "  - openconfig-interfaces",
                "",
                "Properties: 12",
                "Generated: schema.json",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            modules: vec!["a".into(), "b".into()],
            warnings: Vec::new(),
            property_count: 3,
            result: GenerateResult::Preview {
                path: PathBuf::from("out.json"),
                content: "{}\n".into(),
            },
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.text(),
            "── out.json ──\n{}\n── Summary ──\n3 properties from 2 modules would be written"
        );
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "path"), "1 path");
        assert_eq!(plural(0, "path"), "0 paths");
    }
}
