//! Placement phase: trees go through the recursive engine, bare graphs get a vertical stack.

use super::parse::{Parsed, ParsedGraph};
use crate::engine::{Placement, PlacementContext, place_tree};
use nestling_core::geom::vector;
use nestling_core::{LimitKind, LimitNotice, Limits, NodeBox, NodeConfig, Result, Wire};
use rustc_hash::{FxHashMap, FxHashSet};

pub fn place(parsed: &Parsed, cx: &PlacementContext<'_>) -> Result<Placement> {
    match &parsed.tree {
        Some(root) => {
            let (root, mut notices) = enforce_tree_limits(root, cx.limits)?;
            let mut placement = place_tree(&root, cx)?;
            notices.append(&mut placement.notices);
            placement.notices = notices;
            Ok(placement)
        }
        None => stack_graph(&parsed.graph, cx),
    }
}

/// Applies depth, children-per-node and node-count limits to a private copy of the tree before
/// any strategy runs. Under `Throw` the first violation aborts; otherwise the copy is pruned.
pub fn enforce_tree_limits(
    root: &NodeConfig,
    limits: &Limits,
) -> Result<(NodeConfig, Vec<LimitNotice>)> {
    let mut tree = root.clone();
    let mut notices = Vec::new();

    if let Some(n) = limits.enforce(LimitKind::Depth, tree.depth(), None)? {
        notices.push(n);
        prune_depth(&mut tree, 0, limits.max_depth);
    }

    cap_children(&mut tree, limits, &mut notices)?;

    if let Some(n) = limits.enforce(LimitKind::Nodes, tree.node_count(), None)? {
        notices.push(n);
        let mut budget = limits.max_nodes.max(1);
        prune_count(&mut tree, &mut budget);
    }

    Ok((tree, notices))
}

fn prune_depth(node: &mut NodeConfig, depth: usize, max: usize) {
    if depth >= max {
        node.children.clear();
        return;
    }
    for c in &mut node.children {
        prune_depth(c, depth + 1, max);
    }
}

fn cap_children(
    node: &mut NodeConfig,
    limits: &Limits,
    notices: &mut Vec<LimitNotice>,
) -> Result<()> {
    if let Some(n) =
        limits.enforce(LimitKind::ChildrenPerNode, node.children.len(), Some(node.id.as_str()))?
    {
        notices.push(n);
        node.children.truncate(limits.max_children_per_node);
    }
    for c in &mut node.children {
        cap_children(c, limits, notices)?;
    }
    Ok(())
}

/// Keeps the first `budget` nodes in pre-order.
fn prune_count(node: &mut NodeConfig, budget: &mut usize) {
    *budget = budget.saturating_sub(1);
    let mut kept = 0;
    for c in &mut node.children {
        if *budget == 0 {
            break;
        }
        prune_count(c, budget);
        kept += 1;
    }
    node.children.truncate(kept);
}

/// Naive layout for graph-only input: one unit box per node stacked top to bottom, one wire per
/// well-formed edge. General graph layout is out of scope.
fn stack_graph(graph: &ParsedGraph, cx: &PlacementContext<'_>) -> Result<Placement> {
    let mut out = Placement::default();

    let mut nodes = graph.nodes.as_slice();
    if let Some(n) = cx.limits.enforce(LimitKind::Nodes, nodes.len(), None)? {
        out.notices.push(n);
        nodes = &nodes[..cx.limits.max_nodes];
    }

    let parents: FxHashMap<&str, Option<&str>> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.parent.as_deref()))
        .collect();
    let step = cx.node_size.height + cx.spacing;
    for (i, n) in nodes.iter().enumerate() {
        if out.boxes.contains_key(&n.id) {
            continue;
        }
        let mut b = NodeBox::new(
            n.id.clone(),
            cx.origin + vector(0.0, out.boxes.len() as f64 * step),
            cx.node_size,
        );
        b.label = n.label.clone();
        b.depth = depth_via_parents(&n.id, &parents);
        tracing::trace!(index = i, id = %n.id, "stacked graph node");
        out.boxes.insert(n.id.clone(), b);
    }

    for e in &graph.edges {
        if e.source == e.target
            || !out.boxes.contains_key(&e.source)
            || !out.boxes.contains_key(&e.target)
        {
            continue;
        }
        out.wires.push(Wire {
            id: e.id.clone(),
            source: e.source.clone(),
            target: e.target.clone(),
            points: None,
        });
    }

    Ok(out)
}

/// Number of parent hops to a node without a parent; stops at cycles.
fn depth_via_parents(id: &str, parents: &FxHashMap<&str, Option<&str>>) -> usize {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut cur = id;
    let mut depth = 0;
    seen.insert(cur);
    while let Some(&Some(p)) = parents.get(cur) {
        if !seen.insert(p) {
            break;
        }
        depth += 1;
        cur = p;
    }
    depth
}
