use crate::config::LayoutConfig;
use crate::graph::{LayoutModel, NodeIndex, Vec2};
use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

/// Single-pass placement over a [`LayoutModel`].
///
/// `focal` is `None` when the focal id did not resolve; implementations
/// fall back to [`circular_layout`] in that case.
pub trait Layouter {
    fn execute(&self, model: &LayoutModel, focal: Option<NodeIndex>) -> Positions;
}

/// Node positions of one layout pass. A node is placed at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Positions {
    slots: Vec<Option<Vec2>>,
}

impl Positions {
    pub fn new(node_count: usize) -> Self {
        Self {
            slots: vec![None; node_count],
        }
    }

    /// Places `idx` unless it already has a position. Returns whether it was placed.
    pub fn place(&mut self, idx: NodeIndex, pos: Vec2) -> bool {
        if let Some(slot) = self.slots.get_mut(idx.0)
            && slot.is_none()
        {
            *slot = Some(pos);
            return true;
        }
        false
    }

    pub fn get(&self, idx: NodeIndex) -> Option<Vec2> {
        self.slots.get(idx.0).copied().flatten()
    }

    pub fn is_placed(&self, idx: NodeIndex) -> bool {
        self.get(idx).is_some()
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Fallback when there is no focal node: every node evenly on one circle.
pub fn circular_layout(model: &LayoutModel) -> Positions {
    const RADIUS_PER_NODE: f32 = 30.0;
    const MIN_RADIUS: f32 = 150.0;
    const MAX_RADIUS: f32 = 300.0;

    let count = model.node_count();
    let mut positions = Positions::new(count);
    if count == 0 {
        return positions;
    }

    let radius = (count as f32 * RADIUS_PER_NODE).clamp(MIN_RADIUS, MAX_RADIUS);
    for idx in model.node_indices() {
        let angle = TAU * idx.0 as f32 / count as f32;
        positions.place(idx, Vec2::from_polar(radius, angle));
    }
    positions
}

/// X offsets of `count` siblings centered on zero.
fn centered_row(count: usize, spacing: f32) -> impl Iterator<Item = f32> {
    let half = count.saturating_sub(1) as f32 / 2.0;
    (0..count).map(move |i| (i as f32 - half) * spacing)
}

fn unplaced(list: &[NodeIndex], positions: &Positions) -> Vec<NodeIndex> {
    let mut out: Vec<NodeIndex> = Vec::with_capacity(list.len());
    for &idx in list {
        if !positions.is_placed(idx) && !out.contains(&idx) {
            out.push(idx);
        }
    }
    out
}

/// Hierarchy below the focal node, its parent above, relations on a ring.
#[derive(Debug, Clone)]
pub struct StandardLayouter {
    pub config: LayoutConfig,
    /// Hierarchy levels expanded below the focal node.
    pub depth_limit: u32,
}

impl StandardLayouter {
    pub const DEFAULT_DEPTH_LIMIT: u32 = 3;

    pub fn new(config: LayoutConfig, depth_limit: u32) -> Self {
        Self {
            config,
            depth_limit,
        }
    }

    /// Breadth-first descent; each parent's children are centered under it.
    fn place_descendants(&self, model: &LayoutModel, focal: NodeIndex, positions: &mut Positions) {
        let gap = self.config.hierarchy_vertical_gap;
        let spacing = self.config.child_horizontal_spacing;
        let mut queue = VecDeque::from([(focal, Vec2::ZERO, 0u32)]);

        while let Some((parent, parent_pos, level)) = queue.pop_front() {
            if level >= self.depth_limit {
                continue;
            }
            // Already-placed children are how cycles are cut.
            let children = unplaced(model.children_of(parent), positions);
            for (child, dx) in children.iter().zip(centered_row(children.len(), spacing)) {
                let pos = Vec2::new(parent_pos.x + dx, parent_pos.y + gap);
                positions.place(*child, pos);
                queue.push_back((*child, pos, level + 1));
            }
        }
    }

    fn place_relations(&self, model: &LayoutModel, focal: NodeIndex, positions: &mut Positions) {
        let ring = unplaced(model.relations_of(focal), positions);
        let count = ring.len();
        for (i, idx) in ring.into_iter().enumerate() {
            let angle = TAU * i as f32 / count as f32;
            positions.place(
                idx,
                Vec2::from_polar(self.config.relation_radial_distance, angle),
            );
        }
    }
}

impl Layouter for StandardLayouter {
    fn execute(&self, model: &LayoutModel, focal: Option<NodeIndex>) -> Positions {
        let Some(focal) = focal else {
            return circular_layout(model);
        };

        let mut positions = Positions::new(model.node_count());
        positions.place(focal, Vec2::ZERO);

        // One level up only.
        if let Some(parent) = model.parent_of(focal) {
            positions.place(parent, Vec2::new(0.0, -self.config.hierarchy_vertical_gap));
        }

        self.place_descendants(model, focal, &mut positions);
        self.place_relations(model, focal, &mut positions);
        positions
    }
}

/// Five fixed zones around the focal node: center, above, below, around
/// and peripheral. Ignores the depth limit.
#[derive(Debug, Clone)]
pub struct ContextualLayouter {
    pub config: LayoutConfig,
}

impl ContextualLayouter {
    pub const PARENT_OFFSET: f32 = 180.0;
    pub const CHILD_ROW_OFFSET: f32 = 180.0;
    pub const CHILD_SPACING: f32 = 120.0;
    pub const AROUND_DISTANCE: f32 = 250.0;
    /// Arc bounds in degrees, measured clockwise from straight up.
    pub const ARC_START_DEGREES: f32 = 45.0;
    pub const ARC_END_DEGREES: f32 = 315.0;
    pub const PERIPHERAL_OFFSET: f32 = 350.0;
    pub const PERIPHERAL_SPACING: f32 = 90.0;

    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Point on the around arc. 0 degrees is straight above the focal node.
    fn arc_point(degrees: f32) -> Vec2 {
        let theta = degrees * PI / 180.0;
        Vec2::new(
            Self::AROUND_DISTANCE * theta.sin(),
            -Self::AROUND_DISTANCE * theta.cos(),
        )
    }

    fn place_around(model: &LayoutModel, focal: NodeIndex, positions: &mut Positions) {
        let around = unplaced(model.relations_of(focal), positions);
        let count = around.len() as f32;
        let sweep = Self::ARC_END_DEGREES - Self::ARC_START_DEGREES;
        for (i, idx) in around.into_iter().enumerate() {
            // Centre of the i-th equal slice of the arc.
            let degrees = Self::ARC_START_DEGREES + sweep * (i as f32 + 0.5) / count;
            positions.place(idx, Self::arc_point(degrees));
        }
    }

    fn place_peripheral(model: &LayoutModel, focal: NodeIndex, positions: &mut Positions) {
        let peripheral = unplaced(model.cross_refs_of(focal), positions);
        let (left, right): (Vec<_>, Vec<_>) = peripheral
            .into_iter()
            .enumerate()
            .partition(|(i, _)| i % 2 == 0);

        for (side, x) in [(left, -Self::PERIPHERAL_OFFSET), (right, Self::PERIPHERAL_OFFSET)] {
            for ((_, idx), y) in side
                .iter()
                .zip(centered_row(side.len(), Self::PERIPHERAL_SPACING))
            {
                positions.place(*idx, Vec2::new(x, y));
            }
        }
    }
}

impl Layouter for ContextualLayouter {
    fn execute(&self, model: &LayoutModel, focal: Option<NodeIndex>) -> Positions {
        let Some(focal) = focal else {
            return circular_layout(model);
        };

        let mut positions = Positions::new(model.node_count());
        positions.place(focal, Vec2::ZERO);

        if let Some(parent) = model.parent_of(focal) {
            positions.place(parent, Vec2::new(0.0, -Self::PARENT_OFFSET));
        }

        let children = unplaced(model.children_of(focal), &positions);
        for (child, x) in children
            .iter()
            .zip(centered_row(children.len(), Self::CHILD_SPACING))
        {
            positions.place(*child, Vec2::new(x, Self::CHILD_ROW_OFFSET));
        }

        Self::place_around(model, focal, &mut positions);
        Self::place_peripheral(model, focal, &mut positions);
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeweave_core::{Edge, EdgeKind, Node, NodeId, NodeType};

    fn model(ids: &[&str], edges: &[(&str, &str, EdgeKind)]) -> LayoutModel {
        let nodes: Vec<Node> = ids
            .iter()
            .map(|id| Node::new(*id, "w", NodeType::Note, *id))
            .collect();
        let edges: Vec<Edge> = edges
            .iter()
            .map(|(s, t, k)| Edge::new(*s, *t, *k))
            .collect();
        LayoutModel::build(&nodes, &edges)
    }

    fn pos(model: &LayoutModel, positions: &Positions, id: &str) -> Option<Vec2> {
        positions.get(model.index_of(&NodeId::from(id))?)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn test_positions_place_once() {
        let mut positions = Positions::new(2);
        assert!(positions.place(NodeIndex(0), Vec2::new(1.0, 1.0)));
        assert!(!positions.place(NodeIndex(0), Vec2::new(5.0, 5.0)));
        assert!(!positions.place(NodeIndex(7), Vec2::ZERO));
        assert_eq!(positions.get(NodeIndex(0)), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(positions.placed_count(), 1);
    }

    #[test]
    fn test_centered_row_is_symmetric() {
        let row: Vec<f32> = centered_row(3, 10.0).collect();
        assert_eq!(row, vec![-10.0, 0.0, 10.0]);
        let row: Vec<f32> = centered_row(2, 10.0).collect();
        assert_eq!(row, vec![-5.0, 5.0]);
        assert_eq!(centered_row(0, 10.0).count(), 0);
    }

    #[test]
    fn test_circular_radius_is_clamped() {
        let small = model(&["a", "b"], &[]);
        let positions = circular_layout(&small);
        assert!((pos(&small, &positions, "a").unwrap().length() - 150.0).abs() < 1e-3);

        let ids: Vec<String> = (0..20).map(|i| format!("n{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let big = model(&refs, &[]);
        let positions = circular_layout(&big);
        assert_eq!(positions.placed_count(), 20);
        assert!((pos(&big, &positions, "n5").unwrap().length() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_standard_grandchildren_center_under_their_parent() {
        use EdgeKind::Hierarchy;
        let m = model(
            &["f", "c1", "c2", "g1", "g2"],
            &[
                ("f", "c1", Hierarchy),
                ("f", "c2", Hierarchy),
                ("c2", "g1", Hierarchy),
                ("c2", "g2", Hierarchy),
            ],
        );
        let layouter = StandardLayouter::new(LayoutConfig::default(), 3);
        let focal = m.index_of(&NodeId::from("f"));
        let positions = layouter.execute(&m, focal);

        assert!(approx(pos(&m, &positions, "c2").unwrap(), Vec2::new(90.0, 150.0)));
        assert!(approx(pos(&m, &positions, "g1").unwrap(), Vec2::new(0.0, 300.0)));
        assert!(approx(pos(&m, &positions, "g2").unwrap(), Vec2::new(180.0, 300.0)));
    }

    #[test]
    fn test_standard_depth_limit_zero_places_only_focal_and_parent() {
        use EdgeKind::Hierarchy;
        let m = model(
            &["p", "f", "c"],
            &[("p", "f", Hierarchy), ("f", "c", Hierarchy)],
        );
        let layouter = StandardLayouter::new(LayoutConfig::default(), 0);
        let positions = layouter.execute(&m, m.index_of(&NodeId::from("f")));

        assert!(pos(&m, &positions, "p").is_some());
        assert!(pos(&m, &positions, "c").is_none());
    }

    #[test]
    fn test_standard_cycle_terminates() {
        use EdgeKind::Hierarchy;
        let m = model(
            &["a", "b", "c"],
            &[("a", "b", Hierarchy), ("b", "c", Hierarchy), ("c", "a", Hierarchy)],
        );
        let layouter = StandardLayouter::new(LayoutConfig::default(), 50);
        let positions = layouter.execute(&m, m.index_of(&NodeId::from("a")));
        assert_eq!(positions.placed_count(), 3);
        assert_eq!(pos(&m, &positions, "a"), Some(Vec2::ZERO));
    }

    #[test]
    fn test_contextual_arc_skips_top_wedge() {
        let ids: Vec<String> = (0..7).map(|i| format!("r{i}")).collect();
        let mut all = vec!["f"];
        all.extend(ids.iter().map(String::as_str));
        let edges: Vec<(&str, &str, EdgeKind)> = ids
            .iter()
            .map(|id| ("f", id.as_str(), EdgeKind::Relation))
            .collect();
        let m = model(&all, &edges);

        let layouter = ContextualLayouter::new(LayoutConfig::default());
        let positions = layouter.execute(&m, m.index_of(&NodeId::from("f")));

        let limit = -ContextualLayouter::AROUND_DISTANCE * (PI / 4.0).cos();
        for id in &ids {
            let p = pos(&m, &positions, id).unwrap();
            assert!((p.length() - ContextualLayouter::AROUND_DISTANCE).abs() < 1e-2);
            assert!(p.y > limit - 1e-3, "{id} at {p:?} is inside the top wedge");
        }
    }

    #[test]
    fn test_contextual_peripheral_alternates_sides() {
        use EdgeKind::CrossWorkspace;
        let m = model(
            &["f", "x1", "x2", "x3"],
            &[
                ("f", "x1", CrossWorkspace),
                ("f", "x2", CrossWorkspace),
                ("f", "x3", CrossWorkspace),
            ],
        );
        let layouter = ContextualLayouter::new(LayoutConfig::default());
        let positions = layouter.execute(&m, m.index_of(&NodeId::from("f")));

        assert_eq!(pos(&m, &positions, "x1"), Some(Vec2::new(-350.0, -45.0)));
        assert_eq!(pos(&m, &positions, "x2"), Some(Vec2::new(350.0, 0.0)));
        assert_eq!(pos(&m, &positions, "x3"), Some(Vec2::new(-350.0, 45.0)));
    }
}
