use serde::{Deserialize, Serialize};
use std::fmt;

/// Work status. Only meaningful on task-like nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl NodeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            NodeStatus::Pending => "pending",
            NodeStatus::InProgress => "in-progress",
            NodeStatus::Completed => "completed",
            NodeStatus::Cancelled => "cancelled",
            NodeStatus::Other(value) => value,
        }
    }

    /// Completed and cancelled work is done; any other status, including
    /// ones this build does not know, still counts as open.
    pub fn is_done(&self) -> bool {
        matches!(self, NodeStatus::Completed | NodeStatus::Cancelled)
    }
}

impl From<&str> for NodeStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().replace('_', "-").as_str() {
            "pending" | "todo" | "open" => NodeStatus::Pending,
            "in-progress" | "doing" => NodeStatus::InProgress,
            "completed" | "done" => NodeStatus::Completed,
            "cancelled" | "canceled" => NodeStatus::Cancelled,
            _ => NodeStatus::Other(value.to_string()),
        }
    }
}

impl From<String> for NodeStatus {
    fn from(value: String) -> Self {
        NodeStatus::from(value.as_str())
    }
}

impl From<NodeStatus> for String {
    fn from(value: NodeStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_aliases() {
        assert_eq!(NodeStatus::from("DONE"), NodeStatus::Completed);
        assert_eq!(NodeStatus::from("in_progress"), NodeStatus::InProgress);
        assert_eq!(NodeStatus::from("todo"), NodeStatus::Pending);
    }

    #[test]
    fn test_unknown_status_is_not_done() {
        let status = NodeStatus::from("blocked");
        assert_eq!(status, NodeStatus::Other("blocked".to_string()));
        assert!(!status.is_done());
        assert!(NodeStatus::Cancelled.is_done());
    }
}
