//! Nodes, choices, and their targets.

use serde::Deserialize;

/// Identifier of the node every fresh session starts at.
pub const START_NODE: &str = "start";

/// Reserved prefix marking ending identifiers.
pub const ENDING_PREFIX: &str = "end_";

/// Whether an identifier names an ending.
pub fn is_ending_id(id: &str) -> bool {
    id.starts_with(ENDING_PREFIX)
}

/// Whether a node continues the story or terminates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A regular passage.
    Normal,
    /// A terminal passage.
    Ending,
}

impl NodeKind {
    /// Classify an identifier.
    pub fn of(id: &str) -> Self {
        if is_ending_id(id) {
            Self::Ending
        } else {
            Self::Normal
        }
    }
}

/// Where a choice leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChoiceTarget {
    /// Another node in the same graph.
    Node(String),
    /// An ending; the identifier is also the ending's identity.
    Ending(String),
}

impl ChoiceTarget {
    /// Classify a raw `next` value from a story document.
    pub fn parse(next: &str) -> Self {
        match NodeKind::of(next) {
            NodeKind::Ending => Self::Ending(next.to_string()),
            NodeKind::Normal => Self::Node(next.to_string()),
        }
    }

    /// The target identifier, whatever its kind.
    pub fn id(&self) -> &str {
        match self {
            Self::Node(id) | Self::Ending(id) => id,
        }
    }

    /// Whether this target terminates the story.
    pub fn is_ending(&self) -> bool {
        matches!(self, Self::Ending(_))
    }
}

/// A labelled edge out of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown on the choice button.
    pub text: String,
    /// Where the choice leads.
    pub target: ChoiceTarget,
}

impl Choice {
    /// Create a choice leading to `next`, classified by its prefix.
    pub fn new(text: impl Into<String>, next: &str) -> Self {
        Self {
            text: text.into(),
            target: ChoiceTarget::parse(next),
        }
    }
}

/// A single passage of the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryNode {
    /// Node identifier.
    pub id: String,
    /// Body text.
    pub text: String,
    /// Ordered choices.
    pub choices: Vec<Choice>,
    /// Kind, decided when the node was loaded.
    pub kind: NodeKind,
}

impl StoryNode {
    /// Create a node with no choices.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        let kind = NodeKind::of(&id);
        Self {
            id,
            text: text.into(),
            choices: Vec::new(),
            kind,
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Whether the node is an ending.
    pub fn is_ending(&self) -> bool {
        self.kind == NodeKind::Ending
    }
}

/// Wire shape of a node inside a story document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawNode {
    pub text: String,
    #[serde(default)]
    pub choices: Vec<RawChoice>,
}

/// Wire shape of a choice inside a story document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawChoice {
    pub text: String,
    pub next: String,
}

impl RawNode {
    pub(crate) fn into_node(self, id: String) -> StoryNode {
        let kind = NodeKind::of(&id);
        StoryNode {
            id,
            text: self.text,
            choices: self
                .choices
                .into_iter()
                .map(|c| Choice::new(c.text, &c.next))
                .collect(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ending_prefix_classifies_targets() {
        assert_eq!(
            ChoiceTarget::parse("end_dragon"),
            ChoiceTarget::Ending("end_dragon".to_string())
        );
        assert_eq!(
            ChoiceTarget::parse("forest"),
            ChoiceTarget::Node("forest".to_string())
        );
    }

    #[test]
    fn bare_end_is_not_an_ending() {
        // Only literal `end_*` keys count.
        assert!(!ChoiceTarget::parse("end").is_ending());
        assert!(!ChoiceTarget::parse("endless_road").is_ending());
    }

    #[test]
    fn node_kind_from_id() {
        assert!(StoryNode::new("end_happy", "Fin.").is_ending());
        assert!(!StoryNode::new("start", "Once upon a time").is_ending());
    }

    #[test]
    fn raw_node_conversion() {
        let raw = RawNode {
            text: "A fork in the road.".to_string(),
            choices: vec![
                RawChoice {
                    text: "Left".to_string(),
                    next: "cave".to_string(),
                },
                RawChoice {
                    text: "Right".to_string(),
                    next: "end_cliff".to_string(),
                },
            ],
        };
        let node = raw.into_node("fork".to_string());
        assert_eq!(node.id, "fork");
        assert_eq!(node.kind, NodeKind::Normal);
        assert_eq!(node.choices.len(), 2);
        assert!(node.choices[1].target.is_ending());
        assert_eq!(node.choices[0].target.id(), "cave");
    }
}
