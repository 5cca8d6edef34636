use std::collections::HashSet;

/// Header names whose cells are never translated.
#[derive(Debug, Clone, Default)]
pub struct ColumnPolicy {
    excluded: HashSet<String>,
}

impl ColumnPolicy {
    /// Builds a policy from a comma-separated list such as `"id,tel,postal"`.
    ///
    /// Entries are trimmed and blank entries dropped, so an empty or
    /// whitespace-only list excludes nothing.
    pub fn parse(list: &str) -> Self {
        Self::from_names(list.split(','))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Self { excluded }
    }

    pub fn is_excluded(&self, column: &str) -> bool {
        self.excluded.contains(column)
    }

    pub fn len(&self) -> usize {
        self.excluded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let policy = ColumnPolicy::parse("id,tel,postal");
        assert!(policy.is_excluded("id"));
        assert!(policy.is_excluded("tel"));
        assert!(policy.is_excluded("postal"));
        assert!(!policy.is_excluded("city"));
        assert_eq!(policy.len(), 3);
    }

    #[test]
    fn test_empty_and_blank_lists_exclude_nothing() {
        for list in ["", "   ", ",", " , ,"] {
            let policy = ColumnPolicy::parse(list);
            assert!(policy.is_empty(), "list {list:?} should be a no-op");
            assert!(!policy.is_excluded(""));
        }
    }

    #[test]
    fn test_entries_are_trimmed() {
        let policy = ColumnPolicy::parse(" id , city ");
        assert!(policy.is_excluded("id"));
        assert!(policy.is_excluded("city"));
    }

    #[test]
    fn test_match_is_exact() {
        let policy = ColumnPolicy::parse("Id");
        assert!(policy.is_excluded("Id"));
        assert!(!policy.is_excluded("id"));
        assert!(!policy.is_excluded("Id2"));
    }
}
