/// Selector value that matches every namespace in the cluster.
pub const ALL_NAMESPACES_SELECTOR: &str = "*";

/// Set of namespaces a snapshot run should cover.
///
/// Parsed from the `namespaces` configuration value, which is either the
/// wildcard `*` or a comma-separated list of namespace names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceSelector {
    /// Snapshot every namespace visible through the cluster API.
    All,
    /// Snapshot exactly the listed namespaces, in order.
    Explicit(Vec<String>),
}

impl NamespaceSelector {
    /// Parses a selector from its configuration string form.
    ///
    /// Surrounding whitespace is trimmed from the selector and from each list
    /// entry. Empty entries are dropped, duplicates are kept. Returns [`None`]
    /// when the selector resolves to no namespaces.
    pub fn parse(raw: &str) -> Option<NamespaceSelector> {
        let raw = raw.trim();

        if raw == ALL_NAMESPACES_SELECTOR {
            return Some(NamespaceSelector::All);
        }

        let namespaces: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|namespace| !namespace.is_empty())
            .map(str::to_string)
            .collect();

        if namespaces.is_empty() {
            return None;
        }

        Some(NamespaceSelector::Explicit(namespaces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_selects_all_namespaces() {
        assert_eq!(NamespaceSelector::parse("*"), Some(NamespaceSelector::All));
        assert_eq!(
            NamespaceSelector::parse("  *  "),
            Some(NamespaceSelector::All)
        );
    }

    #[test]
    fn comma_separated_list_is_trimmed_and_ordered() {
        assert_eq!(
            NamespaceSelector::parse(" kube-system , default ,prod"),
            Some(NamespaceSelector::Explicit(vec![
                "kube-system".to_string(),
                "default".to_string(),
                "prod".to_string(),
            ]))
        );
    }

    #[test]
    fn empty_entries_are_dropped() {
        assert_eq!(
            NamespaceSelector::parse("default,,prod,"),
            Some(NamespaceSelector::Explicit(vec![
                "default".to_string(),
                "prod".to_string(),
            ]))
        );
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(
            NamespaceSelector::parse("default,default"),
            Some(NamespaceSelector::Explicit(vec![
                "default".to_string(),
                "default".to_string(),
            ]))
        );
    }

    #[test]
    fn empty_selector_is_rejected() {
        assert_eq!(NamespaceSelector::parse(""), None);
        assert_eq!(NamespaceSelector::parse("  "), None);
        assert_eq!(NamespaceSelector::parse(",,"), None);
    }
}
