use crate::audit::audit;
use crate::registry::StrategyRegistry;
use nestling_core::{
    LayoutSnapshot, LimitNotice, Plan, SnapshotMeta, Tuning, ValidationIssue,
};
use std::sync::atomic::{AtomicU64, Ordering};

static VERSION: AtomicU64 = AtomicU64::new(1);

/// Next snapshot version token; strictly increasing for the life of the process.
pub fn next_version() -> u64 {
    VERSION.fetch_add(1, Ordering::Relaxed)
}

pub struct PostInput<'a> {
    pub plan: Plan,
    pub validation: Vec<ValidationIssue>,
    pub notices: Vec<LimitNotice>,
    pub router: &'a str,
    pub strategies: &'a StrategyRegistry,
    pub tuning: &'a Tuning,
    pub spacing: f64,
}

/// Stamps the version token and attaches plan, validation issues, limit notices and audit
/// findings as metadata.
pub fn post(mut snapshot: LayoutSnapshot, input: PostInput<'_>) -> LayoutSnapshot {
    let findings = audit(
        &snapshot.boxes,
        &input.plan,
        input.strategies,
        input.tuning,
        input.spacing,
    );
    snapshot.version = next_version();
    snapshot.meta = Some(SnapshotMeta {
        plan: input.plan,
        validation: input.validation,
        audit: findings,
        notices: input.notices,
        router: Some(input.router.to_string()),
    });
    snapshot
}
