//! Renderable data handed to the presentation layer.

use std::fmt;

use tw_story::StoryNode;

use crate::visited::VisitedChoices;

/// Everything needed to render the current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryView {
    /// Node identifier.
    pub stage: String,
    /// Body text.
    pub text: String,
    /// Choice buttons, in order.
    pub choices: Vec<ChoiceView>,
    /// Whether the node is an ending.
    pub is_ending: bool,
    /// Whether back-navigation is available.
    pub can_go_back: bool,
}

/// One choice button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// Position of the choice in the node.
    pub index: usize,
    /// Button label.
    pub text: String,
    /// The reader has taken this choice before.
    pub visited: bool,
    /// The choice terminates the story.
    pub leads_to_ending: bool,
}

impl StoryView {
    pub(crate) fn of_node(node: &StoryNode, visited: &VisitedChoices, can_go_back: bool) -> Self {
        let choices = node
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| ChoiceView {
                index,
                text: choice.text.clone(),
                visited: visited.contains(&node.id, index),
                leads_to_ending: choice.target.is_ending(),
            })
            .collect();

        Self {
            stage: node.id.clone(),
            text: node.text.clone(),
            choices,
            is_ending: node.is_ending(),
            can_go_back,
        }
    }

    /// An ending reached through a choice but not authored as a node.
    pub(crate) fn unauthored_ending(stage: &str, can_go_back: bool) -> Self {
        Self {
            stage: stage.to_string(),
            text: String::new(),
            choices: Vec::new(),
            is_ending: true,
            can_go_back,
        }
    }
}

/// Discovered endings against the total the story offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndingProgress {
    /// Distinct endings reached this session.
    pub discovered: usize,
    /// Endings in the loaded graph.
    pub total: usize,
}

impl fmt::Display for EndingProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.discovered, self.total)
    }
}
