//! Recursive placement.
//!
//! A node's box is either handed down by its parent (every child) or computed here (the root).
//! Its mode then decides how its children get theirs: Graph children become unit boxes around
//! the parent joined by wires, Nested children are carved out of the parent's content rectangle.
//! The only mutable state is the [`Placement`] accumulator threaded through the recursion.

use crate::registry::StrategyRegistry;
use crate::strategy::{LayoutStrategy, PlaceRequest, content_rect};
use indexmap::IndexMap;
use nestling_core::geom::{
    Point, Rect, Size, SizeExt, rect_center, size, top_left_for_center, vector,
};
use nestling_core::{
    Error, LimitKind, LimitNotice, Limits, Mode, NodeBox, NodeConfig, Plan, Result, Tuning, Wire,
};
use std::f64::consts::PI;

/// Immutable inputs shared by every step of one placement pass.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub tuning: &'a Tuning,
    pub limits: &'a Limits,
    pub strategies: &'a StrategyRegistry,
    pub plan: &'a Plan,
    /// Unit node size at level 0.
    pub node_size: Size,
    pub spacing: f64,
    /// Root top-left when the root carries no explicit position.
    pub origin: Point,
}

/// Output accumulator: boxes in pre-order keyed by id, wires in emission order.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub boxes: IndexMap<String, NodeBox>,
    pub wires: Vec<Wire>,
    pub notices: Vec<LimitNotice>,
}

pub fn place_tree(root: &NodeConfig, cx: &PlacementContext<'_>) -> Result<Placement> {
    let mut out = Placement::default();
    place_node(root, None, 0, cx, &mut out)?;
    tracing::debug!(
        boxes = out.boxes.len(),
        wires = out.wires.len(),
        "placed tree rooted at `{}`",
        root.id
    );
    Ok(out)
}

fn place_node(
    node: &NodeConfig,
    assigned: Option<NodeBox>,
    level: usize,
    cx: &PlacementContext<'_>,
    out: &mut Placement,
) -> Result<()> {
    if level > cx.limits.max_depth {
        return Err(Error::LimitExceeded {
            limit: LimitKind::Depth,
            actual: level,
            max: cx.limits.max_depth,
        });
    }

    let entry = cx.plan.resolve(&node.id);
    let strategy = cx.strategies.get(entry.layout)?;
    let children = capped_children(node, cx, out)?;

    let mut b = match assigned {
        Some(b) => b,
        None => {
            let s = match entry.mode {
                Mode::Graph => cx.node_size,
                Mode::Nested => strategy.preferred_size(
                    children.len(),
                    cx.tuning.nested_unit_size(cx.node_size, level + 1),
                    cx.spacing,
                    Mode::Nested,
                    cx.tuning,
                ),
            };
            NodeBox::new(node.id.clone(), node.position.unwrap_or(cx.origin), s)
        }
    };
    b.depth = level;
    b.label = node.label.clone();
    out.boxes.insert(node.id.clone(), b.clone());

    if children.is_empty() {
        return Ok(());
    }

    match entry.mode {
        Mode::Nested => place_nested(node, &b, children, strategy, level, cx, out),
        Mode::Graph => place_graph(node, &b, children, strategy, level, cx, out),
    }
}

/// Children handed to the strategy, capped at `max_children_per_node`.
fn capped_children<'n>(
    node: &'n NodeConfig,
    cx: &PlacementContext<'_>,
    out: &mut Placement,
) -> Result<&'n [NodeConfig]> {
    let all = node.children.as_slice();
    match cx
        .limits
        .enforce(LimitKind::ChildrenPerNode, all.len(), Some(node.id.as_str()))?
    {
        Some(notice) => {
            out.notices.push(notice);
            Ok(&all[..cx.limits.max_children_per_node])
        }
        None => Ok(all),
    }
}

fn place_graph(
    node: &NodeConfig,
    b: &NodeBox,
    children: &[NodeConfig],
    strategy: &dyn LayoutStrategy,
    level: usize,
    cx: &PlacementContext<'_>,
    out: &mut Placement,
) -> Result<()> {
    let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
    let centers = strategy.place_children(
        &PlaceRequest {
            mode: Mode::Graph,
            children: &ids,
            parent: b,
            level,
            node_size: cx.node_size,
            spacing: cx.spacing,
        },
        cx.tuning,
    );

    for child in children {
        let Some(&center) = centers.get(&child.id) else {
            continue;
        };
        let child_box = NodeBox::new(
            child.id.clone(),
            top_left_for_center(center, cx.node_size),
            cx.node_size,
        );
        out.wires.push(Wire::between(&node.id, &child.id));
        place_node(child, Some(child_box), level + 1, cx, out)?;
    }
    Ok(())
}

fn place_nested(
    node: &NodeConfig,
    b: &NodeBox,
    children: &[NodeConfig],
    strategy: &dyn LayoutStrategy,
    level: usize,
    cx: &PlacementContext<'_>,
    out: &mut Placement,
) -> Result<()> {
    let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
    let frames = strategy.nested_frames(&ids, b.size, cx.spacing, cx.tuning);
    let content = content_rect(b.position, b.size, cx.spacing, cx.tuning);
    let item = cx.tuning.item_pad(cx.spacing);

    if !frames.is_empty() {
        for child in children {
            let Some(cell) = frames.get(&child.id) else {
                continue;
            };
            let mut child_box = NodeBox::new(
                child.id.clone(),
                content.origin + vector(cell.origin.x + item, cell.origin.y + item),
                cell.size.deflate(item),
            );
            child_box.parent_id = Some(node.id.clone());
            place_node(child, Some(child_box), level + 1, cx, out)?;
        }
        return Ok(());
    }

    let desired: Vec<Size> = children
        .iter()
        .map(|c| desired_size(c, level + 1, cx))
        .collect::<Result<_>>()?;
    let widest = desired.iter().fold(0.0_f64, |m, s| m.max(s.width));
    let tallest = desired.iter().fold(0.0_f64, |m, s| m.max(s.height));

    let inner_radius = content.size.min_side() / 2.0;
    let cap = cx.tuning.nested_child_max_fraction * 2.0 * inner_radius;
    let extent = size(widest.min(cap), tallest.min(cap));

    let centers = strategy.place_children(
        &PlaceRequest {
            mode: Mode::Nested,
            children: &ids,
            parent: b,
            level,
            node_size: extent,
            spacing: cx.spacing,
        },
        cx.tuning,
    );
    let ring_center = rect_center(&content);
    let radius = centers
        .values()
        .next()
        .map(|c| c.distance_to(ring_center))
        .unwrap_or(0.0);
    let k = fit_scale(
        children.len(),
        radius,
        item,
        size(widest, tallest),
        inner_radius,
        cx.tuning,
    );

    for (child, want) in children.iter().zip(desired) {
        let Some(&center) = centers.get(&child.id) else {
            continue;
        };
        let s = want.scale(k);
        let mut child_box = NodeBox::new(child.id.clone(), top_left_for_center(center, s), s);
        child_box.parent_id = Some(node.id.clone());
        place_node(child, Some(child_box), level + 1, cx, out)?;
    }
    Ok(())
}

/// Size a child would take before fit-scaling: its own container size if it nests children,
/// otherwise the unit size shrunk for its depth.
fn desired_size(child: &NodeConfig, level: usize, cx: &PlacementContext<'_>) -> Result<Size> {
    let unit = cx.tuning.nested_unit_size(cx.node_size, level);
    let entry = cx.plan.resolve(&child.id);
    if entry.mode != Mode::Nested || child.children.is_empty() {
        return Ok(unit);
    }
    let count = child.children.len().min(cx.limits.max_children_per_node);
    let strategy = cx.strategies.get(entry.layout)?;
    Ok(strategy.preferred_size(
        count,
        cx.tuning.nested_unit_size(cx.node_size, level + 1),
        cx.spacing,
        Mode::Nested,
        cx.tuning,
    ))
}

/// Uniform shrink factor for ring-placed nested children.
///
/// Bounds the largest child (`max_child`) so that its half-diagonal fits inside the ring radius
/// minus padding, its diagonal fits the chord between adjacent centers minus padding, and its
/// longest side stays within `nested_child_max_fraction` of the inner diameter. The chord is
/// compared against the diagonal because axis-aligned boxes at diagonal angles would otherwise
/// touch. Never above 1; falls back to `fit_scale_floor` when the bounds degenerate.
pub fn fit_scale(
    count: usize,
    radius: f64,
    item_pad: f64,
    max_child: Size,
    inner_radius: f64,
    tuning: &Tuning,
) -> f64 {
    let diagonal = max_child.width.hypot(max_child.height);
    let side = max_child.max_side();

    let k_radial = (radius - item_pad) / (diagonal / 2.0);
    let k_tangential = if count >= 2 {
        let chord = 2.0 * radius * (PI / count as f64).sin();
        (chord - item_pad) / diagonal
    } else {
        f64::INFINITY
    };
    let k_fraction = tuning.nested_child_max_fraction * 2.0 * inner_radius / side;

    let k = 1.0_f64.min(k_radial).min(k_tangential).min(k_fraction);
    if !k.is_finite() || k <= 0.0 {
        tuning.fit_scale_floor
    } else {
        k
    }
}

/// Inner content rectangle of a nested parent, as the audit and exporters see it.
pub fn nested_content(parent: &NodeBox, spacing: f64, tuning: &Tuning) -> Rect {
    content_rect(parent.position, parent.size, spacing, tuning)
}
