//! Source location helpers for module file errors.

use miette::SourceSpan;

/// Find the span of a name in the TOML source
///
/// Searches for patterns like `.name]`, `.name.`, or `name = "value"`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    // Table header patterns with leading dot
    // e.g., [nodes.name] or [nodes.parent.children.name]
    let header_patterns = [format!(".{}]", name), format!(".{}.", name)];

    for pattern in &header_patterns {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // Quoted values, e.g. name = "ethernetCsmacd" or base = "ianaift:other"
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}
