//! Advisory post-placement checks on nested parent/child pairs.
//!
//! Findings are reported, never enforced: the snapshot is returned regardless.

use crate::engine::nested_content;
use crate::registry::StrategyRegistry;
use indexmap::IndexMap;
use nestling_core::geom::{SizeExt, rect_contains};
use nestling_core::{AuditIssue, AuditIssueKind, AuditSeverity, NodeBox, Plan, Tuning};

pub fn audit(
    boxes: &IndexMap<String, NodeBox>,
    plan: &Plan,
    strategies: &StrategyRegistry,
    tuning: &Tuning,
    spacing: f64,
) -> Vec<AuditIssue> {
    let mut issues = Vec::new();
    let mut families: IndexMap<&str, Vec<&NodeBox>> = IndexMap::new();

    for child in boxes.values() {
        let Some(parent_id) = child.parent_id.as_deref() else {
            continue;
        };
        let Some(parent) = boxes.get(parent_id) else {
            continue;
        };
        check_pair(parent, child, spacing, tuning, &mut issues);
        families.entry(parent_id).or_default().push(child);
    }

    for (parent_id, children) in &families {
        let Some(parent) = boxes.get(*parent_id) else {
            continue;
        };
        // An unregistered layout already failed placement; nothing to add here.
        let Ok(strategy) = strategies.get(plan.resolve(parent_id).layout) else {
            continue;
        };
        let content = nested_content(parent, spacing, tuning);
        strategy.audit_children(parent, &content, children, tuning, &mut issues);
    }

    if !issues.is_empty() {
        tracing::warn!(count = issues.len(), "layout audit reported issues");
    }
    issues
}

fn check_pair(
    parent: &NodeBox,
    child: &NodeBox,
    spacing: f64,
    tuning: &Tuning,
    issues: &mut Vec<AuditIssue>,
) {
    let content = nested_content(parent, spacing, tuning);
    let tol = tuning.containment_tolerance;
    let mut push = |severity, kind, message: String| {
        issues.push(AuditIssue {
            severity,
            kind,
            parent_id: parent.id.clone(),
            child_id: child.id.clone(),
            message,
        });
    };

    let aspect = child.size.aspect();
    if !aspect.is_finite() || (aspect - 1.0).abs() > tuning.square_tolerance {
        push(
            AuditSeverity::Warning,
            AuditIssueKind::NotSquare,
            format!("`{}` has aspect ratio {:.3}", child.id, aspect),
        );
    }

    let longest = child.size.max_side();
    let room = content.size.min_side();
    if longest > room {
        push(
            AuditSeverity::Violation,
            AuditIssueKind::OversizedChild,
            format!(
                "`{}` is {:.2}px on its longest side, parent content allows {:.2}px",
                child.id, longest, room
            ),
        );
    }

    if !rect_contains(&content, &child.rect(), tol) {
        push(
            AuditSeverity::Violation,
            AuditIssueKind::OutsideParent,
            format!("`{}` leaves the content area of `{}`", child.id, parent.id),
        );
    }
}
