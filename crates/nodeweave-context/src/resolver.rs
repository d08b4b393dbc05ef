use crate::{ContextError, ContextOptions, ContextView, OptionsError, Suggestion};
use nodeweave_core::{Node, NodeId};
use nodeweave_index::{GraphIndex, NodeIndex, jaccard};
use std::collections::HashSet;

/// Weight of tag overlap in the suggestion score.
pub const TAG_WEIGHT: f64 = 0.65;
/// Weight of title/content keyword overlap in the suggestion score.
pub const KEYWORD_WEIGHT: f64 = 0.35;

/// Computes the context view of a focal node.
///
/// Stateless apart from its options: every call builds its own
/// [`GraphIndex`], so one resolver can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct ContextResolver {
    options: ContextOptions,
}

impl ContextResolver {
    pub fn new(options: ContextOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    pub fn resolve(&self, node_id: &NodeId, nodes: &[Node]) -> Result<ContextView, ContextError> {
        let not_found = || ContextError::NodeNotFound(node_id.clone());
        let index = GraphIndex::for_node(nodes, node_id).ok_or_else(not_found)?;
        let focal = index.index_of(node_id).ok_or_else(not_found)?;

        let direct = index.relations_of(focal);
        let backlinks = index.backlinks_of(focal);
        let parent = index.parent_of(focal);
        let children = index.children_of(focal);

        let view = ContextView {
            node: index[focal].clone(),
            direct_relations: collect(&index, direct),
            backlinks: collect(&index, backlinks),
            backlink_count: index.backlink_count(focal),
            shared_tag_neighbors: collect(&index, &shared_tag_neighbors(&index, focal)),
            recently_connected: collect(
                &index,
                &self.recently_connected(&index, focal),
            ),
            parent: parent.map(|p| index[p].clone()),
            children: collect(&index, children),
            ancestors: collect(&index, &index.ancestors(focal)),
            pending_descendant_tasks: collect(&index, &pending_descendants(&index, focal)),
            suggestions: self.suggestions(&index, focal),
        };

        tracing::debug!(
            node = %node_id,
            relations = view.direct_relations.len(),
            backlinks = view.backlink_count,
            suggestions = view.suggestions.len(),
            "Resolved context"
        );

        Ok(view)
    }

    fn recently_connected(&self, index: &GraphIndex<'_>, focal: NodeIndex) -> Vec<NodeIndex> {
        let mut connected = index.related_of(focal);
        // Stable sort keeps relation order for equal timestamps.
        connected.sort_by(|a, b| {
            index[*b]
                .updated_at_parsed()
                .cmp(&index[*a].updated_at_parsed())
        });
        connected.truncate(self.options.recently_connected_limit);
        connected
    }

    fn suggestions(&self, index: &GraphIndex<'_>, focal: NodeIndex) -> Vec<Suggestion> {
        let mut excluded: HashSet<NodeIndex> = HashSet::from([focal]);
        excluded.extend(index.relations_of(focal));
        excluded.extend(index.backlinks_of(focal));
        excluded.extend(index.parent_of(focal));
        excluded.extend(index.children_of(focal));

        let focal_tags = index.tags_of(focal);
        let focal_tokens = index.tokens_of(focal);

        let mut scored: Vec<(NodeIndex, Suggestion)> = index
            .indices()
            .filter(|idx| !excluded.contains(idx))
            .filter_map(|idx| {
                let tags = index.tags_of(idx);
                let tokens = index.tokens_of(idx);
                let shared_tags: Vec<String> = focal_tags.intersection(tags).cloned().collect();
                let shared_keywords: Vec<String> =
                    focal_tokens.intersection(tokens).cloned().collect();

                if shared_tags.is_empty() && shared_keywords.is_empty() {
                    return None;
                }

                let tag_similarity = jaccard(focal_tags, tags);
                let keyword_similarity = jaccard(focal_tokens, tokens);
                let score =
                    round4(TAG_WEIGHT * tag_similarity + KEYWORD_WEIGHT * keyword_similarity);

                if score < self.options.min_suggestion_score {
                    return None;
                }

                Some((
                    idx,
                    Suggestion {
                        node: index[idx].clone(),
                        score,
                        tag_similarity,
                        keyword_similarity,
                        shared_tags,
                        shared_keywords,
                    },
                ))
            })
            .collect();

        scored.sort_by(|(a_idx, a), (b_idx, b)| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| {
                    index[*b_idx]
                        .updated_at_parsed()
                        .cmp(&index[*a_idx].updated_at_parsed())
                })
        });
        scored.truncate(self.options.suggestion_limit);
        scored.into_iter().map(|(_, s)| s).collect()
    }
}

/// One-shot form of [`ContextResolver::resolve`].
pub fn resolve_context(
    node_id: &NodeId,
    nodes: &[Node],
    options: ContextOptions,
) -> Result<ContextView, ContextError> {
    ContextResolver { options }.resolve(node_id, nodes)
}

fn collect(index: &GraphIndex<'_>, list: &[NodeIndex]) -> Vec<Node> {
    list.iter().map(|&idx| index[idx].clone()).collect()
}

fn shared_tag_neighbors(index: &GraphIndex<'_>, focal: NodeIndex) -> Vec<NodeIndex> {
    let focal_tags = index.tags_of(focal);
    if focal_tags.is_empty() {
        return Vec::new();
    }
    index
        .indices()
        .filter(|&idx| idx != focal)
        .filter(|&idx| !focal_tags.is_disjoint(index.tags_of(idx)))
        .collect()
}

fn pending_descendants(index: &GraphIndex<'_>, focal: NodeIndex) -> Vec<NodeIndex> {
    index
        .descendants_bfs(focal, None)
        .into_iter()
        .map(|(idx, _)| idx)
        .filter(|&idx| index[idx].is_pending_work())
        .collect()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
