//! Paths command report data structures.

use super::{
    generate::plural,
    output::{Output, Report},
};

/// One collected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRow {
    pub path: String,
    pub kind: String,
    /// Type name of leaves and leaf-lists.
    pub type_name: Option<String>,
    pub read_only: bool,
}

/// Report listing collected paths in order.
#[derive(Debug)]
pub struct PathsReport {
    pub rows: Vec<PathRow>,
    /// Whether read-only paths were included.
    pub all: bool,
}

impl Report for PathsReport {
    fn render(&self, out: &mut dyn Output) {
        let width = self.rows.iter().map(|r| r.path.len()).max().unwrap_or(0);

        for row in &self.rows {
            let mut line = format!("{:<width$}  {:<9}", row.path, row.kind, width = width);
            if let Some(ty) = &row.type_name {
                line.push_str("  ");
                line.push_str(ty);
            }
            if row.read_only {
                line.push_str("  (ro)");
            }
            out.preformatted(line.trim_end());
        }

        out.newline();
        let noun = if self.all { "path" } else { "config path" };
        out.preformatted(&plural(self.rows.len(), noun));
    }
}
