//! Wire routing over a placed snapshot.

use nestling_core::geom::{Point, point};
use nestling_core::{LayoutSnapshot, NodeBox, Wire};

pub trait Router: Send + Sync {
    /// Explicit polyline for `wire`, or `None` to keep implicit center-to-center connectivity
    /// (for example when an endpoint box is missing).
    fn route(&self, wire: &Wire, snapshot: &LayoutSnapshot) -> Option<Vec<Point>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAnchor {
    #[default]
    Center,
    /// Where the center-to-center segment leaves each box.
    Perimeter,
}

/// Straight segment between the two endpoint boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRouter {
    pub anchor: LineAnchor,
}

impl Router for LineRouter {
    fn route(&self, wire: &Wire, snapshot: &LayoutSnapshot) -> Option<Vec<Point>> {
        let src = snapshot.node(&wire.source)?;
        let dst = snapshot.node(&wire.target)?;
        let (a, b) = match self.anchor {
            LineAnchor::Center => (src.center(), dst.center()),
            LineAnchor::Perimeter => (
                perimeter_point(src, dst.center()),
                perimeter_point(dst, src.center()),
            ),
        };
        Some(vec![a, b])
    }
}

/// Manhattan elbow between box sides; the shorter of the horizontal-first and vertical-first
/// candidates wins, horizontal-first on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrthoRouter;

impl OrthoRouter {
    /// `(horizontal_first, vertical_first)` candidate polylines from `src` to `dst`.
    pub fn candidates(src: &NodeBox, dst: &NodeBox) -> (Vec<Point>, Vec<Point>) {
        let s = src.center();
        let d = dst.center();
        let sx = if d.x >= s.x { 1.0 } else { -1.0 };
        let sy = if d.y >= s.y { 1.0 } else { -1.0 };

        let h_start = point(s.x + sx * src.size.width / 2.0, s.y);
        let h_end = point(d.x, d.y - sy * dst.size.height / 2.0);
        let horizontal = vec![h_start, point(h_end.x, h_start.y), h_end];

        let v_start = point(s.x, s.y + sy * src.size.height / 2.0);
        let v_end = point(d.x - sx * dst.size.width / 2.0, d.y);
        let vertical = vec![v_start, point(v_start.x, v_end.y), v_end];

        (horizontal, vertical)
    }
}

impl Router for OrthoRouter {
    fn route(&self, wire: &Wire, snapshot: &LayoutSnapshot) -> Option<Vec<Point>> {
        let src = snapshot.node(&wire.source)?;
        let dst = snapshot.node(&wire.target)?;
        let (horizontal, vertical) = Self::candidates(src, dst);
        if polyline_length(&vertical) < polyline_length(&horizontal) {
            Some(vertical)
        } else {
            Some(horizontal)
        }
    }
}

/// Point where the ray from `b`'s center toward `toward` crosses `b`'s border. Returns the center
/// itself when `toward` lies inside the box.
pub fn perimeter_point(b: &NodeBox, toward: Point) -> Point {
    let c = b.center();
    let dx = toward.x - c.x;
    let dy = toward.y - c.y;
    let hw = b.size.width / 2.0;
    let hh = b.size.height / 2.0;
    let tx = if dx != 0.0 { hw / dx.abs() } else { f64::INFINITY };
    let ty = if dy != 0.0 { hh / dy.abs() } else { f64::INFINITY };
    let t = tx.min(ty);
    if !t.is_finite() || t >= 1.0 {
        return c;
    }
    point(c.x + dx * t, c.y + dy * t)
}

pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}
