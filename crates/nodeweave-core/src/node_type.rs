use serde::{Deserialize, Serialize};
use std::fmt;

/// Open-ended node type.
///
/// The known values get their own variants; anything else is kept verbatim
/// in `Other` so types added by newer clients survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    #[default]
    Note,
    Task,
    Project,
    Idea,
    Link,
    Event,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Note => "note",
            NodeType::Task => "task",
            NodeType::Project => "project",
            NodeType::Idea => "idea",
            NodeType::Link => "link",
            NodeType::Event => "event",
            NodeType::Other(value) => value,
        }
    }

    pub fn is_task_like(&self) -> bool {
        matches!(self, NodeType::Task)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NodeType::Other(_))
    }
}

impl From<&str> for NodeType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "note" => NodeType::Note,
            "task" => NodeType::Task,
            "project" => NodeType::Project,
            "idea" => NodeType::Idea,
            "link" => NodeType::Link,
            "event" => NodeType::Event,
            _ => NodeType::Other(value.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        NodeType::from(value.as_str())
    }
}

impl From<NodeType> for String {
    fn from(value: NodeType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
