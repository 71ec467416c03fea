//! Parent-relative node/edge lists for contained-node UIs.

use crate::Result;
use nestling_core::geom::Point;
use nestling_core::LayoutSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowPosition {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for FlowPosition {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Relative to the parent's top-left when `parent_id` is set, absolute otherwise.
    pub position: FlowPosition,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub points: Option<Vec<FlowPosition>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// Nodes come parents first (snapshot pre-order); a node whose parent is missing from the
/// snapshot keeps its absolute position and loses the `parent_id`.
pub fn export_flow(snapshot: &LayoutSnapshot) -> FlowGraph {
    let nodes = snapshot
        .boxes
        .values()
        .map(|b| {
            let parent = b.parent_id.as_deref().and_then(|p| snapshot.node(p));
            let position = match parent {
                Some(p) => b.position - p.position.to_vector(),
                None => b.position,
            };
            FlowNode {
                id: b.id.clone(),
                label: b.label.clone(),
                position: position.into(),
                width: b.size.width,
                height: b.size.height,
                parent_id: parent.map(|p| p.id.clone()),
                depth: b.depth,
            }
        })
        .collect();

    let edges = snapshot
        .wires
        .iter()
        .map(|w| FlowEdge {
            id: w.id.clone(),
            source: w.source.clone(),
            target: w.target.clone(),
            points: w
                .points
                .as_ref()
                .map(|pts| pts.iter().copied().map(FlowPosition::from).collect()),
        })
        .collect();

    FlowGraph { nodes, edges }
}

pub fn export_flow_json(snapshot: &LayoutSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_flow(snapshot))?)
}
