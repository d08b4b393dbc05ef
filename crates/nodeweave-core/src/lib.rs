use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod error;
pub mod node_type;
pub mod status;
pub mod time;

pub use error::CoreError;
pub use node_type::NodeType;
pub use status::NodeStatus;
pub use time::{parse_timestamp, parse_timestamp_strict};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WorkspaceId(pub String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkspaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An atomic knowledge record.
///
/// Nodes are owned by the capture/editing surfaces. Everything in this
/// workspace only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub workspace_id: WorkspaceId,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub relation_ids: Vec<NodeId>,
    #[serde(default)]
    pub cross_workspace_refs: Vec<NodeId>,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub status: Option<NodeStatus>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        workspace_id: impl Into<WorkspaceId>,
        node_type: NodeType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            node_type,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Parsed `updated_at`; `None` sorts before every real instant.
    pub fn updated_at_parsed(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_timestamp(&self.updated_at)
    }

    pub fn created_at_parsed(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// A task-like node whose status says the work is still open.
    pub fn is_pending_work(&self) -> bool {
        self.node_type.is_task_like()
            && self
                .status
                .as_ref()
                .is_none_or(|status| !status.is_done())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// parent -> child
    Hierarchy,
    /// Stored on one side, read symmetrically.
    Relation,
    CrossWorkspace,
}

impl EdgeKind {
    /// Hierarchy edges render straight; everything else is drawn curved.
    pub fn is_curved(self) -> bool {
        !matches!(self, EdgeKind::Hierarchy)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Hierarchy => write!(f, "hierarchy"),
            EdgeKind::Relation => write!(f, "relation"),
            EdgeKind::CrossWorkspace => write!(f, "cross-workspace"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }

    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite to `id`, if `id` is one of the endpoints.
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "n1",
            "workspaceId": "ws",
            "type": "task",
            "title": "Write report",
            "tags": ["Work"],
            "relationIds": ["n2"],
            "crossWorkspaceRefs": ["x9"],
            "parentId": "p1",
            "metadata": {"priority": 2},
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
            "status": "pending"
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, NodeId::from("n1"));
        assert_eq!(node.node_type, NodeType::Task);
        assert_eq!(node.relation_ids, vec![NodeId::from("n2")]);
        assert_eq!(node.cross_workspace_refs, vec![NodeId::from("x9")]);
        assert_eq!(node.parent_id, Some(NodeId::from("p1")));
        assert_eq!(node.status, Some(NodeStatus::Pending));
        assert!(node.is_pending_work());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let node: Node = serde_json::from_str(r#"{"id": "a", "workspaceId": "w"}"#).unwrap();
        assert_eq!(node.node_type, NodeType::Note);
        assert!(node.tags.is_empty());
        assert!(node.parent_id.is_none());
        assert!(node.updated_at_parsed().is_none());
    }

    #[test]
    fn test_pending_work_requires_task_type() {
        let mut node = Node::new("a", "w", NodeType::Idea, "x");
        node.status = Some(NodeStatus::Pending);
        assert!(!node.is_pending_work());

        node.node_type = NodeType::Task;
        assert!(node.is_pending_work());

        node.status = Some(NodeStatus::Completed);
        assert!(!node.is_pending_work());

        node.status = None;
        assert!(node.is_pending_work());
    }

    #[test]
    fn test_edge_curvature_and_other_end() {
        let edge = Edge::new("a", "b", EdgeKind::Relation);
        assert!(edge.kind.is_curved());
        assert!(!EdgeKind::Hierarchy.is_curved());
        assert_eq!(edge.other_end(&NodeId::from("a")), Some(&NodeId::from("b")));
        assert_eq!(edge.other_end(&NodeId::from("c")), None);
        assert_eq!(
            serde_json::to_string(&EdgeKind::CrossWorkspace).unwrap(),
            "\"cross-workspace\""
        );
    }
}
