use crate::util::{escape_xml, fmt};
use nestling_core::geom::Point;
use nestling_core::{LayoutSnapshot, NodeBox};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the snapshot bounds in the viewBox.
    pub padding: f64,
    /// When true, draw one label per box (its label, or its id when unlabeled).
    pub include_labels: bool,
    /// When true, draw wires; unrouted wires become straight center-to-center lines.
    pub include_wires: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            padding: 8.0,
            include_labels: true,
            include_wires: true,
        }
    }
}

pub fn render_snapshot_svg(snapshot: &LayoutSnapshot, options: &SvgRenderOptions) -> String {
    let bounds = snapshot.stats.bounds;
    let pad = options.padding.max(0.0);
    let vb_min_x = bounds.origin.x - pad;
    let vb_min_y = bounds.origin.y - pad;
    let vb_w = bounds.size.width + pad * 2.0;
    let vb_h = bounds.size.height + pad * 2.0;

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        fmt(vb_min_x),
        fmt(vb_min_y),
        fmt(vb_w.max(1.0)),
        fmt(vb_h.max(1.0))
    );
    out.push_str(
        r#"<style>
.node-box { fill: #ffffff; fill-opacity: 0.6; stroke: #2563eb; stroke-width: 1; }
.node-box.nested { stroke: #6b7280; stroke-dasharray: 4 2; }
.node-label { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 11px; text-anchor: middle; dominant-baseline: middle; }
.wire { fill: none; stroke: #111827; stroke-width: 1; }
</style>
"#,
    );

    out.push_str(r#"<g class="nodes">"#);
    for b in snapshot.boxes.values() {
        render_box(&mut out, b);
    }
    out.push_str("</g>\n");

    if options.include_wires {
        out.push_str(r#"<g class="wires">"#);
        for w in &snapshot.wires {
            let points: Vec<Point> = match &w.points {
                Some(points) => points.clone(),
                None => match (snapshot.node(&w.source), snapshot.node(&w.target)) {
                    (Some(s), Some(t)) => vec![s.center(), t.center()],
                    _ => continue,
                },
            };
            if points.len() < 2 {
                continue;
            }
            let _ = write!(
                &mut out,
                r#"<polyline class="wire" data-id="{}" points=""#,
                escape_xml(&w.id)
            );
            for (idx, p) in points.iter().enumerate() {
                if idx > 0 {
                    out.push(' ');
                }
                let _ = write!(&mut out, "{},{}", fmt(p.x), fmt(p.y));
            }
            out.push_str(r#"" />"#);
        }
        out.push_str("</g>\n");
    }

    if options.include_labels {
        out.push_str(r#"<g class="labels">"#);
        for b in snapshot.boxes.values() {
            let c = b.center();
            let text = b.label.as_deref().unwrap_or(&b.id);
            let _ = write!(
                &mut out,
                r#"<text class="node-label" x="{}" y="{}">{}</text>"#,
                fmt(c.x),
                fmt(c.y),
                escape_xml(text)
            );
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn render_box(out: &mut String, b: &NodeBox) {
    let class = if b.parent_id.is_some() {
        "node-box nested"
    } else {
        "node-box"
    };
    let _ = write!(
        out,
        r#"<rect class="{}" data-id="{}" x="{}" y="{}" width="{}" height="{}" />"#,
        class,
        escape_xml(&b.id),
        fmt(b.position.x),
        fmt(b.position.y),
        fmt(b.size.width),
        fmt(b.size.height)
    );
}
