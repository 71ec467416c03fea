//! Structural checks. Issues are collected, never raised; the policy decides what they cost.

use super::parse::ParsedGraph;
use nestling_core::{Error, Result, ValidationIssue, ValidationIssueKind, ValidationPolicy};
use rustc_hash::FxHashSet;

pub fn validate(graph: &ParsedGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for n in &graph.nodes {
        if !seen.insert(n.id.as_str()) {
            issues.push(ValidationIssue {
                kind: ValidationIssueKind::DuplicateId,
                id: n.id.clone(),
                message: format!("node id `{}` is used more than once", n.id),
            });
        }
    }

    for e in &graph.edges {
        if e.source == e.target {
            issues.push(ValidationIssue {
                kind: ValidationIssueKind::SelfLoop,
                id: e.id.clone(),
                message: format!("edge `{}` connects `{}` to itself", e.id, e.source),
            });
        }
        for endpoint in [&e.source, &e.target] {
            if !seen.contains(endpoint.as_str()) {
                issues.push(ValidationIssue {
                    kind: ValidationIssueKind::MissingEndpoint,
                    id: e.id.clone(),
                    message: format!("edge `{}` references missing node `{}`", e.id, endpoint),
                });
            }
        }
    }

    issues
}

pub fn apply_policy(issues: &[ValidationIssue], policy: ValidationPolicy) -> Result<()> {
    if issues.is_empty() {
        return Ok(());
    }
    match policy {
        ValidationPolicy::Ignore => Ok(()),
        ValidationPolicy::Warn => {
            for issue in issues {
                tracing::warn!(kind = ?issue.kind, id = %issue.id, "{}", issue.message);
            }
            Ok(())
        }
        ValidationPolicy::Error => Err(Error::InvalidInput {
            issues: issues.to_vec(),
        }),
    }
}
