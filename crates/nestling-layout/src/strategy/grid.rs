use super::{LayoutStrategy, PlaceRequest, content_rect, sibling_overlaps};
use crate::frames::GridFrames;
use crate::iter::unit_square;
use indexmap::IndexMap;
use nestling_core::geom::{Point, Rect, Size, point, rect_center, size};
use nestling_core::{AuditIssue, LayoutKind, Mode, NodeBox, Tuning};

/// Near-square grid: a block of cells below a Graph parent, or an exact tiling of a Nested
/// parent's interior.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridStrategy;

impl GridStrategy {
    fn graph_centers(req: &PlaceRequest<'_>, tuning: &Tuning) -> IndexMap<String, Point> {
        let count = req.children.len();
        let (_, cols) = tuning.grid_shape(count);
        let rows = count.div_ceil(cols.max(1));
        let pad = tuning.item_pad(req.spacing);
        let cell = size(
            req.node_size.width + 2.0 * pad,
            req.node_size.height + 2.0 * pad,
        );
        let block = size(cols as f64 * cell.width, rows as f64 * cell.height);
        let anchor = req.parent.center() + tuning.graph_anchor_offset(req.parent_size(), req.spacing);

        let mut out = IndexMap::with_capacity(count);
        for slot in unit_square(count, cols) {
            let x = anchor.x - block.width / 2.0 + slot.u * block.width;
            let y = anchor.y + slot.v * block.height;
            out.insert(req.children[slot.index].to_string(), point(x.round(), y.round()));
        }
        out
    }

    /// Cell centers for callers driving the strategy through [`LayoutStrategy::place_children`];
    /// the engine reads [`LayoutStrategy::nested_frames`] directly.
    fn nested_centers(&self, req: &PlaceRequest<'_>, tuning: &Tuning) -> IndexMap<String, Point> {
        let content = content_rect(req.origin(), req.parent_size(), req.spacing, tuning);
        let frames = self.nested_frames(req.children, req.parent_size(), req.spacing, tuning);
        frames
            .iter()
            .map(|(id, cell)| {
                let c = rect_center(cell);
                (id.to_string(), point(content.origin.x + c.x, content.origin.y + c.y))
            })
            .collect()
    }
}

impl LayoutStrategy for GridStrategy {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Grid
    }

    fn preferred_size(
        &self,
        count: usize,
        node_size: Size,
        spacing: f64,
        mode: Mode,
        tuning: &Tuning,
    ) -> Size {
        if mode == Mode::Graph || count == 0 {
            return node_size;
        }
        let (rows, cols) = tuning.grid_shape(count);
        let item = tuning.item_pad(spacing);
        let outer = tuning.outer_pad(spacing);
        size(
            cols as f64 * (node_size.width + 2.0 * item) + 2.0 * outer,
            rows as f64 * (node_size.height + 2.0 * item) + 2.0 * outer,
        )
    }

    fn nested_frames(
        &self,
        children: &[&str],
        parent_size: Size,
        spacing: f64,
        tuning: &Tuning,
    ) -> GridFrames {
        let content = content_rect(point(0.0, 0.0), parent_size, spacing, tuning);
        let (_, cols) = tuning.grid_shape(children.len());
        GridFrames::tile(children, content.size, cols)
    }

    fn place_children(&self, req: &PlaceRequest<'_>, tuning: &Tuning) -> IndexMap<String, Point> {
        if req.children.is_empty() {
            return IndexMap::new();
        }
        match req.mode {
            Mode::Graph => Self::graph_centers(req, tuning),
            Mode::Nested => self.nested_centers(req, tuning),
        }
    }

    fn audit_children(
        &self,
        parent: &NodeBox,
        _content: &Rect,
        children: &[&NodeBox],
        _tuning: &Tuning,
        issues: &mut Vec<AuditIssue>,
    ) {
        sibling_overlaps(parent, children, issues);
    }
}
