//! Child placement strategies.
//!
//! A strategy is a set of pure functions of its arguments and the explicit [`Tuning`]; it holds
//! no state and never sees the rest of the tree. The engine resolves one per node through the
//! [`crate::registry::StrategyRegistry`].

mod grid;
mod radial;

pub use grid::GridStrategy;
pub use radial::RadialStrategy;

use crate::frames::GridFrames;
use indexmap::IndexMap;
use nestling_core::geom::{Point, Rect, Size, SizeExt, rects_overlap, vector};
use nestling_core::{AuditIssue, AuditIssueKind, AuditSeverity, LayoutKind, Mode, NodeBox, Tuning};

/// Arguments of [`LayoutStrategy::place_children`].
///
/// The placement area is derived from `parent`: Graph children are arranged around the parent
/// box, Nested children inside its content rectangle.
#[derive(Debug, Clone, Copy)]
pub struct PlaceRequest<'a> {
    pub mode: Mode,
    pub children: &'a [&'a str],
    pub parent: &'a NodeBox,
    /// Tree level of the parent.
    pub level: usize,
    /// Size to plan each child around (unit size in Graph mode, largest child in Nested mode).
    pub node_size: Size,
    pub spacing: f64,
}

impl PlaceRequest<'_> {
    pub fn origin(&self) -> Point {
        self.parent.position
    }

    pub fn parent_size(&self) -> Size {
        self.parent.size
    }
}

pub trait LayoutStrategy: Send + Sync {
    fn kind(&self) -> LayoutKind;

    /// Size a Nested container needs for `count` children of base size `node_size`.
    /// Graph mode has no container, so it answers `node_size`.
    fn preferred_size(
        &self,
        count: usize,
        node_size: Size,
        spacing: f64,
        mode: Mode,
        tuning: &Tuning,
    ) -> Size;

    /// Exact per-child cells inside a Nested parent of `parent_size`. Empty when the strategy has
    /// no discrete cells.
    fn nested_frames(
        &self,
        children: &[&str],
        parent_size: Size,
        spacing: f64,
        tuning: &Tuning,
    ) -> GridFrames;

    /// Absolute center per child id.
    fn place_children(&self, req: &PlaceRequest<'_>, tuning: &Tuning) -> IndexMap<String, Point>;

    /// Size that holds `count` default-size children.
    fn autosize_parent(
        &self,
        count: usize,
        node_size: Size,
        spacing: f64,
        tuning: &Tuning,
    ) -> Size {
        self.preferred_size(count, node_size, spacing, Mode::Nested, tuning)
    }

    /// Strategy-specific advisory checks on the nested children of `parent`.
    fn audit_children(
        &self,
        _parent: &NodeBox,
        _content: &Rect,
        _children: &[&NodeBox],
        _tuning: &Tuning,
        _issues: &mut Vec<AuditIssue>,
    ) {
    }
}

/// Interior of a Nested container: the box minus outer padding, at least one unit per axis.
pub fn content_rect(
    parent_position: Point,
    parent_size: Size,
    spacing: f64,
    tuning: &Tuning,
) -> Rect {
    let pad = tuning.outer_pad(spacing);
    Rect::new(parent_position + vector(pad, pad), parent_size.deflate(pad))
}

/// Reports every pair of nested siblings whose boxes intersect on both axes.
pub fn sibling_overlaps(parent: &NodeBox, children: &[&NodeBox], issues: &mut Vec<AuditIssue>) {
    for (i, a) in children.iter().enumerate() {
        for b in &children[i + 1..] {
            if rects_overlap(&a.rect(), &b.rect()) {
                issues.push(AuditIssue {
                    severity: AuditSeverity::Violation,
                    kind: AuditIssueKind::SiblingOverlap,
                    parent_id: parent.id.clone(),
                    child_id: a.id.clone(),
                    message: format!("`{}` overlaps sibling `{}`", a.id, b.id),
                });
            }
        }
    }
}
