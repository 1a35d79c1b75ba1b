//! The in-memory story graph.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{LoadError, StoryResult};
use crate::node::{RawNode, START_NODE, StoryNode, is_ending_id};
use crate::outline::OutlineNode;

/// Number of choice buttons a reader can show for one node.
pub const MAX_CHOICES: usize = 3;

/// A story graph for one (story, language) pair.
///
/// Immutable once loaded; a language switch replaces the whole graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGraph {
    story_id: String,
    language: String,
    nodes: HashMap<String, StoryNode>,
}

impl StoryGraph {
    /// Create an empty graph. Mostly useful for building graphs in code.
    pub fn new(story_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            language: language.into(),
            nodes: HashMap::new(),
        }
    }

    /// Add a node, replacing any node with the same identifier.
    pub fn with_node(mut self, node: StoryNode) -> Self {
        self.nodes.insert(node.id.clone(), node);
        self
    }

    /// Parse a story document.
    ///
    /// The document is a JSON object keyed by node identifier. It must
    /// contain a `start` node and no node keyed by the empty string. Choices whose target is the bare `end`
    /// sentinel are kept as plain node references and reported, since
    /// endings are identified by their literal `end_*` key.
    pub fn from_json(story_id: &str, language: &str, json: &str) -> StoryResult<Self> {
        let raw: HashMap<String, RawNode> =
            serde_json::from_str(json).map_err(|source| LoadError::Malformed {
                story: story_id.to_string(),
                language: language.to_string(),
                source,
            })?;

        if !raw.contains_key(START_NODE) {
            return Err(LoadError::MissingStart {
                story: story_id.to_string(),
                language: language.to_string(),
            });
        }

        if raw.contains_key("") {
            return Err(LoadError::EmptyNodeId {
                story: story_id.to_string(),
                language: language.to_string(),
            });
        }

        let nodes: HashMap<String, StoryNode> = raw
            .into_iter()
            .map(|(id, node)| {
                let node = node.into_node(id.clone());
                report_authoring_issues(story_id, &node);
                (id, node)
            })
            .collect();

        let graph = Self {
            story_id: story_id.to_string(),
            language: language.to_string(),
            nodes,
        };
        debug!(
            story = story_id,
            language,
            nodes = graph.len(),
            endings = graph.count_endings(),
            "parsed story document"
        );
        Ok(graph)
    }

    /// Story identifier.
    pub fn story_id(&self) -> &str {
        &self.story_id
    }

    /// Language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Look up a node.
    pub fn get(&self, id: &str) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// The `start` node, if present.
    pub fn start(&self) -> Option<&StoryNode> {
        self.get(START_NODE)
    }

    /// Number of ending nodes (keys with the `end_` prefix).
    pub fn count_endings(&self) -> usize {
        self.nodes.keys().filter(|id| is_ending_id(id)).count()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.values()
    }

    /// Outline of the graph from `start`, with `current` marked.
    pub fn outline(&self, current: &str) -> OutlineNode {
        OutlineNode::build(self, current)
    }
}

fn report_authoring_issues(story_id: &str, node: &StoryNode) {
    if node.choices.len() > MAX_CHOICES {
        warn!(
            story = story_id,
            node = %node.id,
            choices = node.choices.len(),
            "node has more choices than a reader can show"
        );
    }
    for (index, choice) in node.choices.iter().enumerate() {
        if choice.target.id() == "end" {
            warn!(
                story = story_id,
                node = %node.id,
                index,
                "choice targets the bare `end` sentinel; use a distinct `end_*` key"
            );
        }
    }
}
