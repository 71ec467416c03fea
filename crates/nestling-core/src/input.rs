use crate::model::{LayoutKind, Mode, NodeConfig};
use serde::{Deserialize, Serialize};

/// What a caller hands to `compute`: a rooted tree or an explicit node/edge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutInput {
    Tree {
        root: NodeConfig,
    },
    Graph {
        nodes: Vec<GraphNode>,
        #[serde(default)]
        edges: Vec<GraphEdge>,
    },
}

impl LayoutInput {
    pub fn tree(root: NodeConfig) -> Self {
        LayoutInput::Tree { root }
    }

    pub fn graph(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        LayoutInput::Graph { nodes, edges }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LayoutInput::Tree { .. } => "tree",
            LayoutInput::Graph { .. } => "graph",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub layout: Option<LayoutKind>,
    #[serde(default)]
    pub mode: Option<Mode>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            layout: None,
            mode: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Defaults to `"{source}->{target}"` when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn edge_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}->{}", self.source, self.target))
    }
}
