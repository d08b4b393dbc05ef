use crate::config::{ConfigError, LayoutConfig};
use crate::graph::{LayoutModel, Vec2};
use crate::layout::{ContextualLayouter, Layouter, Positions, StandardLayouter};
use nodeweave_core::{Edge, EdgeKind, Node, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Hierarchy below, parent above, relations on a full ring.
    #[default]
    Standard,
    /// Five fixed zones; ignores the depth limit.
    Contextual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl PositionedNode {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEdge {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub edge_type: EdgeKind,
    pub is_curved: bool,
    pub source_point: Vec2,
    pub target_point: Vec2,
}

/// Output of one layout call. Nodes follow input node order, edges follow
/// input edge order; anything without a position is left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub positioned_nodes: Vec<PositionedNode>,
    pub positioned_edges: Vec<PositionedEdge>,
}

impl LayoutResult {
    pub fn position_of(&self, id: &NodeId) -> Option<Vec2> {
        self.positioned_nodes
            .iter()
            .find(|n| &n.id == id)
            .map(PositionedNode::center)
    }

    /// Min and max corners of the node centers.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = self.positioned_nodes.first()?.center();
        Some(
            self.positioned_nodes
                .iter()
                .fold((first, first), |(min, max), n| {
                    (
                        Vec2::new(min.x.min(n.x), min.y.min(n.y)),
                        Vec2::new(max.x.max(n.x), max.y.max(n.y)),
                    )
                }),
        )
    }

    /// Node pairs whose centers are closer than `min_distance`.
    ///
    /// Placement never nudges nodes apart; this only reports.
    pub fn overlapping_pairs(&self, min_distance: f32) -> Vec<(NodeId, NodeId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.positioned_nodes.iter().enumerate() {
            for b in &self.positioned_nodes[i + 1..] {
                if a.center().distance(b.center()) < min_distance {
                    pairs.push((a.id.clone(), b.id.clone()));
                }
            }
        }
        pairs
    }
}

/// Deterministic one-shot placement of a focal node's neighbourhood.
///
/// Holds only geometry; each call builds its own [`LayoutModel`].
#[derive(Debug, Clone, Default)]
pub struct SpatialLayoutEngine {
    config: LayoutConfig,
}

impl SpatialLayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        focal_id: &NodeId,
        mode: LayoutMode,
        depth_limit: Option<u32>,
    ) -> LayoutResult {
        let model = LayoutModel::build(nodes, edges);
        let focal = model.index_of(focal_id);
        if focal.is_none() {
            tracing::debug!("Focal node {} not in input, using circular layout", focal_id);
        }

        let positions = match mode {
            LayoutMode::Standard => StandardLayouter::new(
                self.config,
                depth_limit.unwrap_or(StandardLayouter::DEFAULT_DEPTH_LIMIT),
            )
            .execute(&model, focal),
            LayoutMode::Contextual => ContextualLayouter::new(self.config).execute(&model, focal),
        };

        let result = self.collect(&model, &positions);

        tracing::debug!(
            ?mode,
            nodes = model.node_count(),
            positioned = result.positioned_nodes.len(),
            edges = result.positioned_edges.len(),
            "Computed layout"
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            let overlaps = result
                .overlapping_pairs(self.config.min_node_distance)
                .len();
            if overlaps > 0 {
                tracing::debug!(
                    "{} node pairs closer than minNodeDistance {}",
                    overlaps,
                    self.config.min_node_distance
                );
            }
        }

        result
    }

    /// Derives typed edges from the focal node's workspace, then lays out.
    ///
    /// `nodes` may include nodes from other workspaces; they are only
    /// reachable through cross-workspace references.
    pub fn layout_nodes(
        &self,
        nodes: &[Node],
        focal_id: &NodeId,
        mode: LayoutMode,
        depth_limit: Option<u32>,
    ) -> LayoutResult {
        let edges = nodes
            .iter()
            .find(|n| &n.id == focal_id)
            .map(|focal| nodeweave_index::build_edges(nodes, &focal.workspace_id))
            .unwrap_or_default();
        self.layout(nodes, &edges, focal_id, mode, depth_limit)
    }

    fn collect(&self, model: &LayoutModel, positions: &Positions) -> LayoutResult {
        let positioned_nodes = model
            .node_indices()
            .filter_map(|idx| {
                positions.get(idx).map(|p| PositionedNode {
                    id: model[idx].clone(),
                    x: p.x,
                    y: p.y,
                    radius: self.config.node_radius,
                })
            })
            .collect();

        let positioned_edges = model
            .edge_indices()
            .filter_map(|edge_idx| {
                let edge = &model[edge_idx];
                let source_point = positions.get(edge.source_idx)?;
                let target_point = positions.get(edge.target_idx)?;
                Some(PositionedEdge {
                    source_id: model[edge.source_idx].clone(),
                    target_id: model[edge.target_idx].clone(),
                    edge_type: edge.kind,
                    is_curved: edge.kind.is_curved(),
                    source_point,
                    target_point,
                })
            })
            .collect();

        LayoutResult {
            positioned_nodes,
            positioned_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeweave_core::NodeType;

    fn node(id: &str) -> Node {
        Node::new(id, "w", NodeType::Note, id)
    }

    #[test]
    fn test_new_rejects_bad_geometry() {
        let config = LayoutConfig {
            node_radius: -1.0,
            ..Default::default()
        };
        assert!(SpatialLayoutEngine::new(config).is_err());
    }

    #[test]
    fn test_bounds_and_overlaps() {
        let result = LayoutResult {
            positioned_nodes: vec![
                PositionedNode { id: "a".into(), x: -10.0, y: 5.0, radius: 1.0 },
                PositionedNode { id: "b".into(), x: 20.0, y: -5.0, radius: 1.0 },
                PositionedNode { id: "c".into(), x: 21.0, y: -5.0, radius: 1.0 },
            ],
            positioned_edges: vec![],
        };

        assert_eq!(
            result.bounds(),
            Some((Vec2::new(-10.0, -5.0), Vec2::new(21.0, 5.0)))
        );
        assert_eq!(
            result.overlapping_pairs(2.0),
            vec![(NodeId::from("b"), NodeId::from("c"))]
        );
        assert!(LayoutResult::default().bounds().is_none());
    }

    #[test]
    fn test_edges_to_unpositioned_nodes_are_dropped() {
        let nodes = vec![node("f"), node("x")];
        let edges = vec![
            Edge::new("f", "x", EdgeKind::CrossWorkspace),
            Edge::new("f", "ghost", EdgeKind::Relation),
        ];
        let engine = SpatialLayoutEngine::default();

        let result = engine.layout(&nodes, &edges, &"f".into(), LayoutMode::Standard, None);
        assert_eq!(result.positioned_nodes.len(), 1);
        assert!(result.positioned_edges.is_empty());

        let result = engine.layout(&nodes, &edges, &"f".into(), LayoutMode::Contextual, None);
        assert_eq!(result.positioned_nodes.len(), 2);
        assert_eq!(result.positioned_edges.len(), 1);
        assert!(result.positioned_edges[0].is_curved);
    }

    #[test]
    fn test_layout_nodes_derives_edges_from_workspace() {
        let mut focal = node("f");
        focal.relation_ids = vec!["r".into()];
        focal.cross_workspace_refs = vec!["other".into()];
        let mut kid = node("k");
        kid.parent_id = Some("f".into());
        let foreign = Node::new("other", "elsewhere", NodeType::Idea, "Other");
        let nodes = vec![focal, node("r"), kid, foreign];

        let result = SpatialLayoutEngine::default().layout_nodes(
            &nodes,
            &"f".into(),
            LayoutMode::Contextual,
            None,
        );

        assert_eq!(result.positioned_nodes.len(), 4);
        assert_eq!(result.position_of(&"k".into()), Some(Vec2::new(0.0, 180.0)));
        assert_eq!(
            result.position_of(&"other".into()),
            Some(Vec2::new(-350.0, 0.0))
        );
    }
}
