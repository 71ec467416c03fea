use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens when a threshold is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitPolicy {
    /// Abort the run with [`Error::LimitExceeded`].
    #[default]
    Throw,
    /// Cap silently.
    Truncate,
    /// Cap and emit a `tracing` warning.
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitKind {
    Depth,
    Nodes,
    ChildrenPerNode,
    Edges,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LimitKind::Depth => "depth",
            LimitKind::Nodes => "node",
            LimitKind::ChildrenPerNode => "children-per-node",
            LimitKind::Edges => "edge",
        };
        f.write_str(s)
    }
}

/// Record of a threshold that was capped instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitNotice {
    pub limit: LimitKind,
    pub actual: usize,
    pub max: usize,
    /// Node id the cap applied to, when it is local to one node.
    #[serde(default)]
    pub node_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    pub max_depth: usize,
    pub max_nodes: usize,
    pub max_children_per_node: usize,
    pub max_edges: usize,
    pub policy: LimitPolicy,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_nodes: 10_000,
            max_children_per_node: 256,
            max_edges: 20_000,
            policy: LimitPolicy::Throw,
        }
    }
}

impl Limits {
    pub fn with_override(&self, o: &LimitsOverride) -> Limits {
        Limits {
            max_depth: o.max_depth.unwrap_or(self.max_depth),
            max_nodes: o.max_nodes.unwrap_or(self.max_nodes),
            max_children_per_node: o
                .max_children_per_node
                .unwrap_or(self.max_children_per_node),
            max_edges: o.max_edges.unwrap_or(self.max_edges),
            policy: o.policy.unwrap_or(self.policy),
        }
    }

    pub fn max_for(&self, kind: LimitKind) -> usize {
        match kind {
            LimitKind::Depth => self.max_depth,
            LimitKind::Nodes => self.max_nodes,
            LimitKind::ChildrenPerNode => self.max_children_per_node,
            LimitKind::Edges => self.max_edges,
        }
    }

    /// Checks `actual` against the threshold for `kind`.
    ///
    /// Returns `Ok(None)` when within bounds, `Ok(Some(notice))` when the caller must cap, and
    /// `Err` under [`LimitPolicy::Throw`].
    pub fn enforce(
        &self,
        kind: LimitKind,
        actual: usize,
        node_id: Option<&str>,
    ) -> Result<Option<LimitNotice>> {
        let max = self.max_for(kind);
        if actual <= max {
            return Ok(None);
        }
        match self.policy {
            LimitPolicy::Throw => Err(Error::LimitExceeded {
                limit: kind,
                actual,
                max,
            }),
            LimitPolicy::Truncate => Ok(Some(LimitNotice {
                limit: kind,
                actual,
                max,
                node_id: node_id.map(str::to_string),
            })),
            LimitPolicy::Warn => {
                tracing::warn!(limit = %kind, actual, max, node_id, "layout limit exceeded; truncating");
                Ok(Some(LimitNotice {
                    limit: kind,
                    actual,
                    max,
                    node_id: node_id.map(str::to_string),
                }))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitsOverride {
    pub max_depth: Option<usize>,
    pub max_nodes: Option<usize>,
    pub max_children_per_node: Option<usize>,
    pub max_edges: Option<usize>,
    pub policy: Option<LimitPolicy>,
}
