//! Path and name helpers shared across crates.

/// Split a possibly qualified name (`prefix:name`) into its qualifier and local part.
///
/// ```
/// use leafwise_core::split_qualified;
///
/// assert_eq!(split_qualified("oc-if:interfaces"), (Some("oc-if"), "interfaces"));
/// assert_eq!(split_qualified("interfaces"), (None, "interfaces"));
/// ```
pub fn split_qualified(s: &str) -> (Option<&str>, &str) {
    match s.split_once(':') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, s),
    }
}

/// The local name of a path segment, with any namespace qualifier removed.
pub fn local_name(segment: &str) -> &str {
    split_qualified(segment).1
}

/// Remove every bracketed predicate clause from a path expression.
///
/// Brackets may nest, and each clause is removed independently, so segments
/// between two predicates survive:
/// `/a/b[name=current()/../x]/c[id=1]/d` becomes `/a/b/c/d`.
pub fn strip_predicates(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
