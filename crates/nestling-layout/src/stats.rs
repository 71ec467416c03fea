use indexmap::IndexMap;
use nestling_core::geom::{Rect, rect, rect_union, rects_overlap};
use nestling_core::{LayoutStats, NodeBox};

/// Aggregates over the final box set in a single pass; the overlap scan is O(n²) and runs only
/// when `collect_overlaps` is set.
pub fn compute_stats(
    boxes: &IndexMap<String, NodeBox>,
    edge_count: usize,
    collect_overlaps: bool,
) -> LayoutStats {
    let max_depth = boxes.values().map(|b| b.depth).max().unwrap_or(0);
    LayoutStats {
        node_count: boxes.len(),
        edge_count,
        max_depth,
        bounds: union_bounds(boxes.values()),
        overlaps: collect_overlaps.then(|| overlapping_pairs(boxes.values())),
    }
}

/// Union of all box rectangles, or a zero rectangle at the origin for an empty set.
pub fn union_bounds<'a>(boxes: impl IntoIterator<Item = &'a NodeBox>) -> Rect {
    boxes
        .into_iter()
        .map(NodeBox::rect)
        .reduce(|acc, r| rect_union(&acc, &r))
        .unwrap_or_else(|| rect(0.0, 0.0, 0.0, 0.0))
}

/// Every unordered pair of boxes whose projections intersect on both axes, each reported once
/// in iteration order.
pub fn overlapping_pairs<'a>(boxes: impl IntoIterator<Item = &'a NodeBox>) -> Vec<(String, String)> {
    let items: Vec<(&str, Rect)> = boxes
        .into_iter()
        .map(|b| (b.id.as_str(), b.rect()))
        .collect();
    let mut out = Vec::new();
    for (i, (a_id, a)) in items.iter().enumerate() {
        for (b_id, b) in &items[i + 1..] {
            if rects_overlap(a, b) {
                out.push((a_id.to_string(), b_id.to_string()));
            }
        }
    }
    out
}
