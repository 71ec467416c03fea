use crate::router::Router;
use nestling_core::{LayoutSnapshot, LimitKind, LimitNotice, Limits, Result};

/// Asks `router` for a polyline per wire, up to `max_edges` wires. Wires past the cap (or that the
/// router declines) keep implicit center-to-center connectivity.
pub fn route(
    mut snapshot: LayoutSnapshot,
    router: &dyn Router,
    limits: &Limits,
) -> Result<(LayoutSnapshot, Option<LimitNotice>)> {
    let total = snapshot.wires.len();
    let notice = limits.enforce(LimitKind::Edges, total, None)?;
    let bound = if notice.is_some() {
        limits.max_edges.min(total)
    } else {
        total
    };

    let routed: Vec<_> = snapshot.wires[..bound]
        .iter()
        .map(|w| router.route(w, &snapshot))
        .collect();
    for (wire, points) in snapshot.wires.iter_mut().zip(routed) {
        wire.points = points;
    }

    tracing::debug!(routed = bound, total, "routed wires");
    Ok((snapshot, notice))
}
