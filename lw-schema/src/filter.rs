//! Module selection by exclusion list.

/// Excludes modules whose name contains any of a list of substrings.
///
/// Matching is case-sensitive substring matching, not exact names:
/// `ietf` skips `ietf-interfaces` and `ietf-yang-types` alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFilter {
    skip: Vec<String>,
}

impl ModuleFilter {
    /// A filter that includes every module.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from exclusion patterns. Empty patterns are ignored.
    pub fn skipping<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated exclusion list such as `"ietf-interfaces,iana"`.
    pub fn from_csv(list: &str) -> Self {
        Self::skipping(list.split(',').map(str::trim))
    }

    /// The pattern that excludes `module`, if any.
    pub fn matching_pattern(&self, module: &str) -> Option<&str> {
        self.skip
            .iter()
            .find(|pattern| module.contains(pattern.as_str()))
            .map(String::as_str)
    }

    pub fn includes(&self, module: &str) -> bool {
        self.matching_pattern(module).is_none()
    }

    pub fn patterns(&self) -> &[String] {
        &self.skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_includes_everything() {
        let filter = ModuleFilter::from_csv("");
        assert!(filter.patterns().is_empty());
        assert!(filter.includes("openconfig-interfaces"));
    }

    #[test]
    fn test_substring_match() {
        let filter = ModuleFilter::from_csv("ietf,iana-if");
        assert!(!filter.includes("ietf-interfaces"));
        assert!(!filter.includes("iana-if-type"));
        assert!(filter.includes("openconfig-interfaces"));
        assert_eq!(filter.matching_pattern("ietf-yang-types"), Some("ietf"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let filter = ModuleFilter::from_csv("IETF");
        assert!(filter.includes("ietf-interfaces"));
    }

    #[test]
    fn test_blank_entries_ignored() {
        let filter = ModuleFilter::from_csv("a,, ,b");
        assert_eq!(filter.patterns(), ["a", "b"]);
    }
}
