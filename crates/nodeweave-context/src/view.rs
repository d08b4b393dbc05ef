use nodeweave_core::Node;
use serde::{Deserialize, Serialize};

/// Everything a viewer needs to place one node in its graph.
///
/// Built fresh on every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextView {
    pub node: Node,
    pub direct_relations: Vec<Node>,
    pub backlinks: Vec<Node>,
    pub backlink_count: usize,
    pub shared_tag_neighbors: Vec<Node>,
    pub recently_connected: Vec<Node>,
    pub parent: Option<Node>,
    pub children: Vec<Node>,
    /// Parent first, root last.
    pub ancestors: Vec<Node>,
    pub pending_descendant_tasks: Vec<Node>,
    pub suggestions: Vec<Suggestion>,
}

/// An unlinked node that probably belongs near the focal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub node: Node,
    pub score: f64,
    pub tag_similarity: f64,
    pub keyword_similarity: f64,
    pub shared_tags: Vec<String>,
    pub shared_keywords: Vec<String>,
}
