//! Tracking which choices the reader has already taken.

use std::collections::{BTreeMap, BTreeSet};

/// Set of `(node, choice index)` pairs the reader has selected.
///
/// Marks are never removed by navigation; only a full session reset clears
/// them. Visiting a choice again records nothing new.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedChoices {
    selected: BTreeMap<String, BTreeSet<usize>>,
}

impl VisitedChoices {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a choice as taken. Returns `true` if it was not marked before.
    pub fn mark(&mut self, node: impl Into<String>, index: usize) -> bool {
        self.selected.entry(node.into()).or_default().insert(index)
    }

    /// Whether a choice has been taken.
    pub fn contains(&self, node: &str, index: usize) -> bool {
        self.selected
            .get(node)
            .is_some_and(|indices| indices.contains(&index))
    }

    /// Choices taken at one node.
    pub fn for_node(&self, node: &str) -> Option<&BTreeSet<usize>> {
        self.selected.get(node)
    }

    /// Total number of marked choices.
    pub fn len(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// Whether nothing has been marked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all marks in node order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.selected
            .iter()
            .flat_map(|(node, indices)| indices.iter().map(move |&i| (node.as_str(), i)))
    }

    /// Remove all marks.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Encode as `"<node>-<index>"` keys, the saved-progress format.
    pub fn to_keys(&self) -> BTreeMap<String, bool> {
        self.iter()
            .map(|(node, index)| (format!("{node}-{index}"), true))
            .collect()
    }

    /// Decode `"<node>-<index>"` keys. Entries set to `false` are skipped.
    ///
    /// Returns the first key that does not end in `-<index>`.
    pub fn from_keys(keys: &BTreeMap<String, bool>) -> Result<Self, String> {
        let mut visited = Self::new();
        for (key, _) in keys.iter().filter(|(_, taken)| **taken) {
            let (node, index) = key
                .rsplit_once('-')
                .and_then(|(node, index)| Some((node, index.parse::<usize>().ok()?)))
                .filter(|(node, _)| !node.is_empty())
                .ok_or_else(|| key.clone())?;
            visited.mark(node, index);
        }
        Ok(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_query() {
        let mut visited = VisitedChoices::new();
        assert!(!visited.contains("start", 0));

        assert!(visited.mark("start", 0));
        assert!(visited.contains("start", 0));
        assert!(!visited.contains("start", 1));
        assert!(!visited.contains("cave", 0));
    }

    #[test]
    fn marking_twice_is_idempotent() {
        let mut visited = VisitedChoices::new();
        assert!(visited.mark("start", 2));
        assert!(!visited.mark("start", 2));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut visited = VisitedChoices::new();
        visited.mark("start", 0);
        visited.mark("cave", 1);
        assert_eq!(visited.for_node("cave").unwrap().len(), 1);

        visited.clear();
        assert!(visited.is_empty());
        assert!(visited.for_node("cave").is_none());
    }

    #[test]
    fn keys_use_dash_index_suffix() {
        let mut visited = VisitedChoices::new();
        visited.mark("dark-forest", 1);
        visited.mark("start", 0);

        let keys = visited.to_keys();
        assert_eq!(keys.get("dark-forest-1"), Some(&true));
        assert_eq!(keys.get("start-0"), Some(&true));

        let decoded = VisitedChoices::from_keys(&keys).unwrap();
        assert_eq!(decoded, visited);
    }

    #[test]
    fn false_entries_are_not_visits() {
        let keys = BTreeMap::from([("start-0".to_string(), false)]);
        assert!(VisitedChoices::from_keys(&keys).unwrap().is_empty());
    }

    #[test]
    fn malformed_keys_are_reported() {
        for bad in ["start", "start-x", "-1"] {
            let keys = BTreeMap::from([(bad.to_string(), true)]);
            assert_eq!(VisitedChoices::from_keys(&keys).unwrap_err(), bad);
        }
    }
}
