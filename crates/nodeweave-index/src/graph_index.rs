use crate::text::{normalize_tags, tokenize};
use nodeweave_core::{Edge, EdgeKind, Node, NodeId, WorkspaceId};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::ops::Index;

/// Position of a node in the index arena. Arena order is input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup structures for one workspace, rebuilt on every call.
///
/// Borrows the caller's node slice; nothing here is cached across calls.
#[derive(Debug)]
pub struct GraphIndex<'a> {
    workspace: WorkspaceId,
    nodes: Vec<&'a Node>,
    node_map: HashMap<&'a str, NodeIndex>,
    parents: Vec<Option<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    relations: Vec<Vec<NodeIndex>>,
    backlinks: Vec<Vec<NodeIndex>>,
    tags: Vec<BTreeSet<String>>,
    tokens: Vec<BTreeSet<String>>,
}

impl<'a> GraphIndex<'a> {
    /// Index every node of `workspace` in `nodes`; other workspaces are skipped.
    pub fn build(nodes: &'a [Node], workspace: &WorkspaceId) -> Self {
        let mut index = Self {
            workspace: workspace.clone(),
            nodes: Vec::new(),
            node_map: HashMap::new(),
            parents: Vec::new(),
            children: Vec::new(),
            relations: Vec::new(),
            backlinks: Vec::new(),
            tags: Vec::new(),
            tokens: Vec::new(),
        };

        for node in nodes.iter().filter(|n| &n.workspace_id == workspace) {
            index.add_node(node);
        }

        let dangling = index.link_hierarchy() + index.link_relations();

        tracing::debug!(
            workspace = %index.workspace,
            nodes = index.nodes.len(),
            dangling,
            "Built graph index"
        );

        index
    }

    /// Index the workspace that `id` lives in, or `None` if no such node exists.
    pub fn for_node(nodes: &'a [Node], id: &NodeId) -> Option<Self> {
        let focal = nodes.iter().find(|n| &n.id == id)?;
        Some(Self::build(nodes, &focal.workspace_id))
    }

    fn add_node(&mut self, node: &'a Node) {
        if self.node_map.contains_key(node.id.as_str()) {
            tracing::warn!(
                "Skipping duplicate node {} in workspace {}",
                node.id,
                self.workspace
            );
            return;
        }

        let idx = NodeIndex(self.nodes.len());
        self.node_map.insert(node.id.as_str(), idx);
        self.nodes.push(node);
        self.parents.push(None);
        self.children.push(Vec::new());
        self.relations.push(Vec::new());
        self.backlinks.push(Vec::new());
        self.tags.push(normalize_tags(&node.tags));
        self.tokens.push(tokenize(&node.title, &node.content));
    }

    fn link_hierarchy(&mut self) -> usize {
        let mut dangling = 0;
        for i in 0..self.nodes.len() {
            let node: &'a Node = self.nodes[i];
            let Some(parent_id) = &node.parent_id else {
                continue;
            };
            match self.index_of(parent_id) {
                // A node claiming itself as parent is treated as a root.
                Some(parent) if parent.0 != i => {
                    self.parents[i] = Some(parent);
                    self.children[parent.0].push(NodeIndex(i));
                }
                Some(_) => {}
                None => dangling += 1,
            }
        }
        dangling
    }

    fn link_relations(&mut self) -> usize {
        let mut dangling = 0;
        for i in 0..self.nodes.len() {
            let node: &'a Node = self.nodes[i];
            let mut seen = HashSet::new();
            for target_id in &node.relation_ids {
                let Some(target) = self.index_of(target_id) else {
                    dangling += 1;
                    continue;
                };
                if target.0 == i || !seen.insert(target) {
                    continue;
                }
                self.relations[i].push(target);
                self.backlinks[target.0].push(NodeIndex(i));
            }
        }
        dangling
    }

    pub fn workspace(&self) -> &WorkspaceId {
        &self.workspace
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_map.get(id.as_str()).copied()
    }

    pub fn get(&self, id: &NodeId) -> Option<&'a Node> {
        self.index_of(id).map(|idx| self.nodes[idx.0])
    }

    pub fn node(&self, idx: NodeIndex) -> &'a Node {
        self.nodes[idx.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &'a Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), *node))
    }

    pub fn parent_of(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.parents[idx.0]
    }

    pub fn children_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.children[idx.0]
    }

    /// Resolved targets of the node's own relation list.
    pub fn relations_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.relations[idx.0]
    }

    /// Nodes whose relation list names `idx`.
    pub fn backlinks_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.backlinks[idx.0]
    }

    pub fn backlink_count(&self, idx: NodeIndex) -> usize {
        self.backlinks[idx.0].len()
    }

    /// Symmetric relation neighbours: outgoing first, then backlinks not already listed.
    pub fn related_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        self.relations[idx.0]
            .iter()
            .chain(self.backlinks[idx.0].iter())
            .copied()
            .filter(|n| seen.insert(*n))
            .collect()
    }

    pub fn tags_of(&self, idx: NodeIndex) -> &BTreeSet<String> {
        &self.tags[idx.0]
    }

    pub fn tokens_of(&self, idx: NodeIndex) -> &BTreeSet<String> {
        &self.tokens[idx.0]
    }

    /// Breadth-first walk of the subtree under `root`, excluding `root`.
    ///
    /// Each entry carries its depth (children are depth 1). A visited set
    /// stops the walk on malformed parent cycles.
    pub fn descendants_bfs(
        &self,
        root: NodeIndex,
        max_depth: Option<usize>,
    ) -> Vec<(NodeIndex, usize)> {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([(root, 0usize)]);
        let mut out = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for &child in self.children_of(current) {
                if !visited.insert(child) {
                    tracing::debug!(
                        "Cycle guard stopped descent at {}",
                        self.nodes[child.0].id
                    );
                    continue;
                }
                out.push((child, depth + 1));
                queue.push_back((child, depth + 1));
            }
        }

        out
    }

    /// Parent chain from the direct parent up to the root.
    pub fn ancestors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut seen = HashSet::from([idx]);
        let mut chain = Vec::new();
        let mut current = idx;

        while let Some(parent) = self.parents[current.0] {
            if !seen.insert(parent) {
                tracing::debug!(
                    "Cycle guard stopped ancestor walk at {}",
                    self.nodes[parent.0].id
                );
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain
    }

    /// Typed edges for the layout engine.
    ///
    /// One hierarchy edge per resolved parent, one relation edge per
    /// unordered resolved pair, one cross-workspace edge per reference.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut relation_pairs = HashSet::new();

        for (idx, node) in self.iter() {
            if let Some(parent) = self.parent_of(idx) {
                edges.push(Edge::new(
                    self.nodes[parent.0].id.clone(),
                    node.id.clone(),
                    EdgeKind::Hierarchy,
                ));
            }

            for &target in self.relations_of(idx) {
                let key = if idx < target { (idx, target) } else { (target, idx) };
                if relation_pairs.insert(key) {
                    edges.push(Edge::new(
                        node.id.clone(),
                        self.nodes[target.0].id.clone(),
                        EdgeKind::Relation,
                    ));
                }
            }

            let mut seen_refs = HashSet::new();
            for foreign in &node.cross_workspace_refs {
                if foreign == &node.id || !seen_refs.insert(foreign) {
                    continue;
                }
                edges.push(Edge::new(
                    node.id.clone(),
                    foreign.clone(),
                    EdgeKind::CrossWorkspace,
                ));
            }
        }

        edges
    }
}

impl<'a> Index<NodeIndex> for GraphIndex<'a> {
    type Output = Node;
    fn index(&self, index: NodeIndex) -> &Self::Output {
        self.nodes[index.0]
    }
}

/// Typed edge list for one workspace.
pub fn build_edges(nodes: &[Node], workspace: &WorkspaceId) -> Vec<Edge> {
    GraphIndex::build(nodes, workspace).edges()
}
