//! The parse → validate → plan → place → route → post pipeline and its [`Engine`] entry point.

pub mod parse;
pub mod place;
pub mod plan;
pub mod post;
pub mod route;
pub mod validate;

use crate::cache::cache_key;
use crate::engine::PlacementContext;
use crate::registry::{InputRegistry, RouterRegistry, StrategyRegistry};
use crate::stats::compute_stats;
use nestling_core::geom::point;
use nestling_core::{ComputeOptions, LayoutInput, LayoutSnapshot, Limits, Result, Tuning};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Engine {
    strategies: StrategyRegistry,
    routers: RouterRegistry,
    inputs: InputRegistry,
    tuning: Tuning,
    limits: Limits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            strategies: StrategyRegistry::with_defaults(),
            routers: RouterRegistry::with_defaults(),
            inputs: InputRegistry::with_defaults(),
            tuning: Tuning::default(),
            limits: Limits::default(),
        }
    }
}

impl Engine {
    /// Default strategies, routers and input adapters with default tuning and limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    pub fn strategies_mut(&mut self) -> &mut StrategyRegistry {
        &mut self.strategies
    }

    pub fn routers(&self) -> &RouterRegistry {
        &self.routers
    }

    pub fn routers_mut(&mut self) -> &mut RouterRegistry {
        &mut self.routers
    }

    pub fn inputs(&self) -> &InputRegistry {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputRegistry {
        &mut self.inputs
    }

    /// Runs every phase in order and returns a fresh snapshot.
    ///
    /// Overrides in `options` are merged into call-local copies of the engine's tuning and limits,
    /// so concurrent calls on a shared `&Engine` never observe each other's settings.
    pub fn compute(&self, input: &LayoutInput, options: &ComputeOptions) -> Result<LayoutSnapshot> {
        let tuning = options.resolve_tuning(&self.tuning);
        let limits = options.resolve_limits(&self.limits);
        let router_name = options.router_name();
        let router = self.routers.get(router_name)?;

        let parsed = parse::parse(input);
        tracing::debug!(
            kind = input.kind(),
            nodes = parsed.graph.nodes.len(),
            edges = parsed.graph.edges.len(),
            "parsed layout input"
        );

        let issues = validate::validate(&parsed.graph);
        validate::apply_policy(&issues, options.validation_policy)?;

        let plan = plan::plan(&parsed.graph, &self.strategies)?;
        tracing::debug!(entries = plan.len(), "resolved layout plan");

        let spacing = options.spacing();
        let cx = PlacementContext {
            tuning: &tuning,
            limits: &limits,
            strategies: &self.strategies,
            plan: &plan,
            node_size: options.node_size(),
            spacing,
            origin: point(0.0, 0.0),
        };
        let placement = place::place(&parsed, &cx)?;
        let mut notices = placement.notices;

        let stats = compute_stats(
            &placement.boxes,
            placement.wires.len(),
            options.collect_overlaps,
        );
        let snapshot = LayoutSnapshot {
            boxes: placement.boxes,
            wires: placement.wires,
            stats,
            version: 0,
            meta: None,
        };

        let (snapshot, edge_notice) = route::route(snapshot, router, &limits)?;
        notices.extend(edge_notice);

        let snapshot = post::post(
            snapshot,
            post::PostInput {
                plan,
                validation: issues,
                notices,
                router: router_name,
                strategies: &self.strategies,
                tuning: &tuning,
                spacing,
            },
        );
        tracing::debug!(
            version = snapshot.version,
            nodes = snapshot.stats.node_count,
            wires = snapshot.stats.edge_count,
            "layout computed"
        );
        Ok(snapshot)
    }

    /// Adapts a raw JSON payload through the input adapter registered for `kind`, then computes.
    pub fn compute_json(
        &self,
        kind: &str,
        payload: &Value,
        options: &ComputeOptions,
    ) -> Result<LayoutSnapshot> {
        let adapter = self.inputs.get(kind)?;
        let input = adapter(payload)?;
        self.compute(&input, options)
    }

    /// Memoization key for `compute(input, options)` against this engine's base configuration.
    pub fn cache_key(&self, input: &LayoutInput, options: &ComputeOptions) -> u64 {
        cache_key(
            input,
            options,
            &options.resolve_tuning(&self.tuning),
            &options.resolve_limits(&self.limits),
        )
    }
}
