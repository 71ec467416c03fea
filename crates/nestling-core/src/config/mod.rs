mod limits;
mod tuning;

pub use limits::{LimitKind, LimitNotice, LimitPolicy, Limits, LimitsOverride};
pub use tuning::{AngleDirection, Tuning, TuningOverride};

use crate::geom::{Size, size};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPACING: f64 = 10.0;
pub const DEFAULT_ROUTER: &str = "line";

pub fn default_node_size() -> Size {
    size(100.0, 50.0)
}

/// How validation issues affect a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationPolicy {
    Ignore,
    /// Log each issue and keep going.
    #[default]
    Warn,
    /// Abort with [`crate::Error::InvalidInput`] when any issue is found.
    Error,
}

/// Per-call options. Overrides are merged into fresh `Tuning`/`Limits` values for the duration of
/// the call only; the engine's base configuration is never touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeOptions {
    pub node_size: Option<Size>,
    pub spacing: Option<f64>,
    pub collect_overlaps: bool,
    pub limits_override: Option<LimitsOverride>,
    pub tuning_override: Option<TuningOverride>,
    pub router_name: Option<String>,
    pub validation_policy: ValidationPolicy,
}

impl ComputeOptions {
    pub fn node_size(&self) -> Size {
        self.node_size.unwrap_or_else(default_node_size)
    }

    pub fn spacing(&self) -> f64 {
        self.spacing.unwrap_or(DEFAULT_SPACING).max(0.0)
    }

    pub fn router_name(&self) -> &str {
        self.router_name.as_deref().unwrap_or(DEFAULT_ROUTER)
    }

    pub fn resolve_tuning(&self, base: &Tuning) -> Tuning {
        match &self.tuning_override {
            Some(o) => base.with_override(o),
            None => base.clone(),
        }
    }

    pub fn resolve_limits(&self, base: &Limits) -> Limits {
        match &self.limits_override {
            Some(o) => base.with_override(o),
            None => base.clone(),
        }
    }

    pub fn with_node_size(mut self, node_size: Size) -> Self {
        self.node_size = Some(node_size);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_router(mut self, name: impl Into<String>) -> Self {
        self.router_name = Some(name.into());
        self
    }

    pub fn with_overlaps(mut self) -> Self {
        self.collect_overlaps = true;
        self
    }

    pub fn with_limits(mut self, o: LimitsOverride) -> Self {
        self.limits_override = Some(o);
        self
    }

    pub fn with_tuning(mut self, o: TuningOverride) -> Self {
        self.tuning_override = Some(o);
        self
    }

    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation_policy = policy;
        self
    }
}
