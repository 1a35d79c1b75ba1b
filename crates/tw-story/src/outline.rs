//! Tree outline of the graph, reachable from `start`.

use std::collections::HashSet;

use crate::graph::StoryGraph;
use crate::node::{START_NODE, is_ending_id};

/// One entry of a story outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Node identifier.
    pub id: String,
    /// Whether this is the reader's current node.
    pub current: bool,
    /// Whether the identifier names an ending.
    pub ending: bool,
    /// The identifier is referenced but has no node in the graph.
    pub missing: bool,
    /// The node was already expanded earlier in the outline.
    pub revisit: bool,
    /// Targets of the node's choices, in choice order.
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Build the outline rooted at `start`.
    ///
    /// Each node is expanded once; later references become `revisit`
    /// leaves, so cyclic stories produce a finite tree.
    pub fn build(graph: &StoryGraph, current: &str) -> Self {
        let mut expanded = HashSet::new();
        expand(graph, START_NODE, current, &mut expanded)
    }

    /// Number of entries in the outline, this one included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::size).sum::<usize>()
    }

    /// Depth-first search for the entry marked current.
    pub fn find_current(&self) -> Option<&OutlineNode> {
        if self.current {
            return Some(self);
        }
        self.children.iter().find_map(OutlineNode::find_current)
    }
}

fn expand(
    graph: &StoryGraph,
    id: &str,
    current: &str,
    expanded: &mut HashSet<String>,
) -> OutlineNode {
    let mut entry = OutlineNode {
        id: id.to_string(),
        current: id == current,
        ending: is_ending_id(id),
        missing: false,
        revisit: false,
        children: Vec::new(),
    };

    let Some(node) = graph.get(id) else {
        entry.missing = !entry.ending;
        return entry;
    };

    if !expanded.insert(id.to_string()) {
        entry.revisit = true;
        return entry;
    }

    entry.children = node
        .choices
        .iter()
        .map(|choice| expand(graph, choice.target.id(), current, expanded))
        .collect();
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Choice, StoryNode};

    fn looping_graph() -> StoryGraph {
        StoryGraph::new("loop", "en")
            .with_node(
                StoryNode::new("start", "Crossroads")
                    .with_choice(Choice::new("Walk", "path"))
                    .with_choice(Choice::new("Rest", "end_sleep")),
            )
            .with_node(
                StoryNode::new("path", "A winding path")
                    .with_choice(Choice::new("Return", "start"))
                    .with_choice(Choice::new("Press on", "tower")),
            )
    }

    #[test]
    fn cycles_become_revisit_leaves() {
        let outline = looping_graph().outline("path");
        assert_eq!(outline.id, "start");
        let path = &outline.children[0];
        assert_eq!(path.id, "path");
        assert!(path.current);

        let back = &path.children[0];
        assert_eq!(back.id, "start");
        assert!(back.revisit);
        assert!(back.children.is_empty());
    }

    #[test]
    fn unauthored_targets_are_flagged() {
        let outline = looping_graph().outline("start");
        let tower = &outline.children[0].children[1];
        assert!(tower.missing);

        // Endings need no authored node.
        let sleep = &outline.children[1];
        assert!(sleep.ending);
        assert!(!sleep.missing);
    }

    #[test]
    fn size_and_current_lookup() {
        let outline = looping_graph().outline("path");
        // start, path, start (revisit), tower, end_sleep
        assert_eq!(outline.size(), 5);
        assert_eq!(outline.find_current().unwrap().id, "path");
        assert!(looping_graph().outline("nowhere").find_current().is_none());
    }
}
