use super::{LayoutStrategy, PlaceRequest, content_rect, sibling_overlaps};
use crate::frames::GridFrames;
use crate::iter::angles;
use indexmap::IndexMap;
use nestling_core::geom::{Point, Rect, Size, SizeExt, point, rect_center, size};
use nestling_core::{AuditIssue, AuditIssueKind, AuditSeverity, LayoutKind, Mode, NodeBox, Tuning};
use std::f64::consts::PI;

/// Children evenly spaced on a circle: a ring around a Graph parent, or a ring inscribed in a
/// Nested parent's interior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialStrategy;

impl RadialStrategy {
    /// Ring radius inside a content area of `content` for children no larger than `child`.
    pub fn nested_radius(content: Size, child: Size, spacing: f64, tuning: &Tuning) -> f64 {
        let r = content.min_side() / 2.0 - child.max_side() / 2.0 - tuning.item_pad(spacing);
        r.max(tuning.min_radius(spacing))
    }

    /// Smallest ring radius whose adjacent centers are separated by at least `w + pad`
    /// horizontally or `h + pad` vertically, at any angle. The chord must span the diagonal of
    /// the padded child box, since boxes stay axis-aligned as they go around the ring.
    pub fn packing_radius(count: usize, child: Size, item_pad: f64) -> f64 {
        if count < 2 {
            return 0.0;
        }
        let span = (child.width + item_pad).hypot(child.height + item_pad);
        span / (2.0 * (PI / count as f64).sin())
    }
}

impl LayoutStrategy for RadialStrategy {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Radial
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
        let item = tuning.item_pad(spacing);
        let side = node_size.max_side();
        let r = Self::packing_radius(count, node_size, item).max(tuning.min_radius(spacing));
        let d = 2.0 * (r + side / 2.0 + item) + 2.0 * tuning.outer_pad(spacing);
        size(d, d)
    }

    fn nested_frames(
        &self,
        _children: &[&str],
        _parent_size: Size,
        _spacing: f64,
        _tuning: &Tuning,
    ) -> GridFrames {
        GridFrames::empty()
    }

    fn place_children(&self, req: &PlaceRequest<'_>, tuning: &Tuning) -> IndexMap<String, Point> {
        let count = req.children.len();
        if count == 0 {
            return IndexMap::new();
        }
        let (center, radius) = match req.mode {
            Mode::Graph => (
                req.parent.center(),
                tuning.radial_ring_radius(req.node_size, req.spacing, req.level),
            ),
            Mode::Nested => {
                let content = content_rect(req.origin(), req.parent_size(), req.spacing, tuning);
                (
                    rect_center(&content),
                    Self::nested_radius(content.size, req.node_size, req.spacing, tuning),
                )
            }
        };

        req.children
            .iter()
            .zip(angles(count, tuning.start_angle(), tuning.direction()))
            .map(|(id, a)| {
                let (sin, cos) = a.sin_cos();
                (
                    (*id).to_string(),
                    point(center.x + radius * cos, center.y + radius * sin),
                )
            })
            .collect()
    }

    fn audit_children(
        &self,
        parent: &NodeBox,
        content: &Rect,
        children: &[&NodeBox],
        tuning: &Tuning,
        issues: &mut Vec<AuditIssue>,
    ) {
        sibling_overlaps(parent, children, issues);
        if children.len() < 2 {
            return;
        }
        let ring_center = rect_center(content);
        let dists: Vec<f64> = children
            .iter()
            .map(|c| c.center().distance_to(ring_center))
            .collect();
        let mean = dists.iter().sum::<f64>() / dists.len() as f64;
        for (child, d) in children.iter().zip(dists) {
            if (d - mean).abs() > tuning.containment_tolerance {
                issues.push(AuditIssue {
                    severity: AuditSeverity::Warning,
                    kind: AuditIssueKind::OffRing,
                    parent_id: parent.id.clone(),
                    child_id: child.id.clone(),
                    message: format!(
                        "`{}` sits {:.2}px from the ring center, ring radius is {:.2}px",
                        child.id, d, mean
                    ),
                });
            }
        }
    }
}
