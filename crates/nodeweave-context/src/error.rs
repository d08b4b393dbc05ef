use nodeweave_core::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The focal id is not in the supplied node set. Callers treat this
    /// as "nothing to show".
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("minSuggestionScore must be within [0, 1], got {0}")]
    ScoreOutOfRange(f64),
    #[error("Invalid context options JSON: {0}")]
    Json(#[from] serde_json::Error),
}
