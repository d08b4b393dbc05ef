//! Per-call lookup structures shared by the context resolver and the
//! layout engine.

pub mod graph_index;
pub mod text;

pub use graph_index::{GraphIndex, NodeIndex, build_edges};
pub use text::{jaccard, normalize_tags, tokenize};
