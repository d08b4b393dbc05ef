use nodeweave_core::{Edge, EdgeKind, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeIndex(pub usize);

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin, `angle` radians from +x toward +y.
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone)]
pub struct ModelEdge {
    pub source_idx: NodeIndex,
    pub target_idx: NodeIndex,
    pub kind: EdgeKind,
}

/// Per-call working graph for the layout engine.
///
/// Built from the caller's nodes and typed edges; edges whose endpoints
/// are missing are dropped here. Adjacency lists keep input order.
#[derive(Debug, Default)]
pub struct LayoutModel {
    ids: Vec<NodeId>,
    node_map: HashMap<NodeId, NodeIndex>,
    edges: Vec<ModelEdge>,
    parents: Vec<Option<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    relations: Vec<Vec<NodeIndex>>,
    cross_refs: Vec<Vec<NodeIndex>>,
}

impl LayoutModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut model = Self::new();
        for node in nodes {
            model.add_node(&node.id);
        }
        let dropped = edges.iter().filter(|edge| !model.add_edge(edge)).count();
        if dropped > 0 {
            tracing::debug!(
                "Dropped {} edges with endpoints outside the node set",
                dropped
            );
        }
        model
    }

    pub fn add_node(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = NodeIndex(self.ids.len());
        self.ids.push(id.clone());
        self.node_map.insert(id.clone(), idx);
        self.parents.push(None);
        self.children.push(Vec::new());
        self.relations.push(Vec::new());
        self.cross_refs.push(Vec::new());
        idx
    }

    /// Returns `false` when the edge was dropped.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        let (Some(&src), Some(&target)) =
            (self.node_map.get(&edge.source), self.node_map.get(&edge.target))
        else {
            return false;
        };
        if src == target {
            return false;
        }

        match edge.kind {
            EdgeKind::Hierarchy => {
                // First parent wins; later ones only keep their edge.
                if self.parents[target.0].is_none() {
                    self.parents[target.0] = Some(src);
                    self.children[src.0].push(target);
                }
            }
            EdgeKind::Relation => {
                Self::link_both(&mut self.relations, src, target);
            }
            EdgeKind::CrossWorkspace => {
                Self::link_both(&mut self.cross_refs, src, target);
            }
        }

        self.edges.push(ModelEdge {
            source_idx: src,
            target_idx: target,
            kind: edge.kind,
        });
        true
    }

    fn link_both(adjacency: &mut [Vec<NodeIndex>], a: NodeIndex, b: NodeIndex) {
        if !adjacency[a.0].contains(&b) {
            adjacency[a.0].push(b);
        }
        if !adjacency[b.0].contains(&a) {
            adjacency[b.0].push(a);
        }
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.ids.len()).map(NodeIndex)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        (0..self.edges.len()).map(EdgeIndex)
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub fn parent_of(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.parents[idx.0]
    }

    pub fn children_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.children[idx.0]
    }

    pub fn relations_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.relations[idx.0]
    }

    pub fn cross_refs_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.cross_refs[idx.0]
    }
}

impl Index<NodeIndex> for LayoutModel {
    type Output = NodeId;
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.ids[index.0]
    }
}

impl Index<EdgeIndex> for LayoutModel {
    type Output = ModelEdge;
    fn index(&self, index: EdgeIndex) -> &Self::Output {
        &self.edges[index.0]
    }
}
