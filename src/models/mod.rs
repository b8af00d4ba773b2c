// Rendering-facing models

pub mod graph_models;

pub use graph_models::{GraphEdge, GraphNode, GraphSnapshot};
