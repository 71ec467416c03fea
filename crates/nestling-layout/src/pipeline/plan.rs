use super::parse::ParsedGraph;
use crate::registry::StrategyRegistry;
use nestling_core::{Error, Plan, PlanEntry, Result};

/// Effective layout kind and mode per node. Unset layouts take the registry fallback, unset
/// modes take Graph. The first occurrence of a duplicated id wins.
pub fn plan(graph: &ParsedGraph, strategies: &StrategyRegistry) -> Result<Plan> {
    let mut plan = Plan::default();
    for n in &graph.nodes {
        if plan.entries.contains_key(&n.id) {
            continue;
        }
        let layout = n.layout.unwrap_or(strategies.fallback_kind());
        if !strategies.contains(layout) {
            return Err(Error::UnknownStrategy {
                kind: layout.to_string(),
            });
        }
        plan.insert(
            n.id.clone(),
            PlanEntry {
                layout,
                mode: n.mode.unwrap_or_default(),
            },
        );
    }
    Ok(plan)
}
