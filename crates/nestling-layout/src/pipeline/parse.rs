//! Input normalization: trees and raw graphs become one node/edge list.

use nestling_core::{LayoutInput, LayoutKind, Mode, NodeConfig, Wire};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNode {
    pub id: String,
    pub label: Option<String>,
    pub parent: Option<String>,
    pub layout: Option<LayoutKind>,
    pub mode: Option<Mode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedGraph {
    pub nodes: Vec<ParsedNode>,
    pub edges: Vec<ParsedEdge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub graph: ParsedGraph,
    /// Private copy of the input tree; `None` for graph input.
    pub tree: Option<NodeConfig>,
}

pub fn parse(input: &LayoutInput) -> Parsed {
    match input {
        LayoutInput::Tree { root } => Parsed {
            graph: flatten_tree(root),
            tree: Some(root.clone()),
        },
        LayoutInput::Graph { nodes, edges } => {
            let edges: Vec<ParsedEdge> = edges
                .iter()
                .map(|e| ParsedEdge {
                    id: e.edge_id(),
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect();

            // A node's parent is the source of its first inbound edge.
            let mut first_inbound: FxHashMap<&str, &str> = FxHashMap::default();
            for e in &edges {
                first_inbound
                    .entry(e.target.as_str())
                    .or_insert(e.source.as_str());
            }

            let nodes = nodes
                .iter()
                .map(|n| ParsedNode {
                    id: n.id.clone(),
                    label: n.label.clone(),
                    parent: first_inbound.get(n.id.as_str()).map(|s| s.to_string()),
                    layout: n.layout,
                    mode: n.mode,
                })
                .collect();

            Parsed {
                graph: ParsedGraph { nodes, edges },
                tree: None,
            }
        }
    }
}

fn flatten_tree(root: &NodeConfig) -> ParsedGraph {
    let mut graph = ParsedGraph::default();
    let mut stack: Vec<(&NodeConfig, Option<&str>)> = vec![(root, None)];
    while let Some((n, parent)) = stack.pop() {
        graph.nodes.push(ParsedNode {
            id: n.id.clone(),
            label: n.label.clone(),
            parent: parent.map(str::to_string),
            layout: n.layout,
            mode: n.mode,
        });
        if let Some(p) = parent {
            let w = Wire::between(p, &n.id);
            graph.edges.push(ParsedEdge {
                id: w.id,
                source: w.source,
                target: w.target,
            });
        }
        for c in n.children.iter().rev() {
            stack.push((c, Some(n.id.as_str())));
        }
    }
    graph
}
