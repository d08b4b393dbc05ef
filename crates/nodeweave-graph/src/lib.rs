pub mod config;
pub mod engine;
pub mod graph;
pub mod layout;

pub use config::{ConfigError, LayoutConfig};
pub use engine::{LayoutMode, LayoutResult, PositionedEdge, PositionedNode, SpatialLayoutEngine};
pub use graph::{EdgeIndex, LayoutModel, ModelEdge, NodeIndex, Vec2};
pub use layout::{ContextualLayouter, Layouter, Positions, StandardLayouter, circular_layout};
