//! Paths operation - list collected paths.

use eyre::{Context, Result};
use leafwise_schema::{DocumentMeta, ModuleFilter, Pipeline};
use leafwise_tree::EntryTree;

use crate::reports::{PathRow, PathsReport};

/// Execute the paths operation.
///
/// Lists configuration paths, or every path when `all` is set.
pub fn paths(tree: &EntryTree, filter: ModuleFilter, all: bool) -> Result<PathsReport> {
    let mut ctx = Pipeline::new()
        .collect_only()
        .run(tree, filter, DocumentMeta::default())
        .wrap_err("Path collection failed")?;
    let indices = ctx.take_indices()?;
    let index = if all { &indices.all } else { &indices.config };

    let rows = index
        .iter()
        .map(|(path, id)| {
            let entry = &tree[id];
            PathRow {
                path: path.to_string(),
                kind: entry.kind().to_string(),
                type_name: entry.type_kind().map(|k| k.to_string()),
                read_only: entry.is_read_only(),
            }
        })
        .collect();

    Ok(PathsReport { rows, all })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures::{SYSTEM, tree};

    #[test]
    fn test_config_paths() {
        let tree = tree(&[SYSTEM]);
        let report = paths(&tree, ModuleFilter::all(), false).unwrap();

        let listed: Vec<_> = report.rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            listed,
            vec![
                "/example-system:system",
                "/example-system:system/alias",
                "/example-system:system/hostname",
            ]
        );
        assert_eq!(report.rows[1].type_name.as_deref(), Some("leafref"));
    }

    #[test]
    fn test_all_paths_include_state() {
        let tree = tree(&[SYSTEM]);
        let report = paths(&tree, ModuleFilter::all(), true).unwrap();

        let uptime = report
            .rows
            .iter()
            .find(|r| r.path == "/example-system:system/state/uptime")
            .unwrap();
        assert!(uptime.read_only);
        assert_eq!(uptime.kind, "leaf");
        assert_eq!(uptime.type_name.as_deref(), Some("uint64"));
        assert_eq!(report.rows.len(), 5);
    }
}
