//! Check command report data structures.

use std::path::PathBuf;

use super::{
    generate::plural,
    output::{Output, Report},
};

/// Report data from loading modules and running the pipeline without output.
#[derive(Debug)]
pub struct CheckReport {
    pub files: Vec<PathBuf>,
    pub modules: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    /// Number of collected paths, state included.
    pub path_count: usize,
    /// Number of collected configuration paths.
    pub config_path_count: usize,
    pub property_count: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!(
            "✓ {} loaded from {}",
            plural(self.modules.len(), "module"),
            plural(self.files.len(), "file")
        ));
        out.newline();
        for module in &self.modules {
            out.list_item(module);
        }
        out.newline();
        out.key_value("Paths", &self.path_count.to_string());
        out.key_value("Config paths", &self.config_path_count.to_string());
        out.key_value("Properties", &self.property_count.to_string());
    }
}
