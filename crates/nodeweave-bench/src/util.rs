use nodeweave_core::{Node, NodeId, NodeStatus, NodeType};

const TAGS: [&str; 8] = [
    "research", "garden", "reading", "q1", "travel", "health", "finance", "writing",
];
const WORDS: [&str; 12] = [
    "plan", "budget", "notes", "draft", "review", "meeting", "summary", "ideas", "trip",
    "habit", "paper", "outline",
];

/// Builds a single-workspace knowledge base of `node_count` nodes.
///
/// Node `i` hangs under node `i / fanout`, links to the two previous nodes
/// and carries a deterministic mix of tags and title words.
pub fn generate_knowledge_base(node_count: usize, fanout: usize) -> Vec<Node> {
    let fanout = fanout.max(1);
    (0..node_count)
        .map(|i| {
            let node_type = if i % 3 == 0 { NodeType::Task } else { NodeType::Note };
            let title = format!(
                "{} {} {}",
                WORDS[i % WORDS.len()],
                WORDS[(i * 7 + 3) % WORDS.len()],
                i
            );
            let mut node = Node::new(format!("node_{i}"), "bench", node_type, title);
            node.content = format!("{} {}", WORDS[(i * 5) % WORDS.len()], TAGS[i % TAGS.len()]);
            node.tags = vec![
                TAGS[i % TAGS.len()].to_string(),
                TAGS[(i / 3) % TAGS.len()].to_string(),
            ];
            if i > 0 {
                node.parent_id = Some(NodeId::from(format!("node_{}", (i - 1) / fanout)));
            }
            node.relation_ids = (1..=2)
                .filter(|d| i >= *d)
                .map(|d| NodeId::from(format!("node_{}", i - d)))
                .collect();
            if i % 4 == 0 {
                node.status = Some(NodeStatus::Pending);
            }
            node.updated_at = format!("2024-03-{:02}T10:00:00Z", i % 28 + 1);
            node
        })
        .collect()
}
