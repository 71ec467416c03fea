//! Runtime-swappable key → implementation maps.
//!
//! Looking up an unregistered key is a configuration error, never a data error: the caller wired
//! the engine wrong, and retrying the same input cannot help.

use crate::router::{LineAnchor, LineRouter, OrthoRouter, Router};
use crate::strategy::{GridStrategy, LayoutStrategy, RadialStrategy};
use nestling_core::{Error, LayoutInput, LayoutKind, Result};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: FxHashMap<LayoutKind, Arc<dyn LayoutStrategy>>,
    fallback: LayoutKind,
}

impl StrategyRegistry {
    /// A registry holding only `fallback`, which also serves nodes that do not pick a layout.
    pub fn new(fallback: Arc<dyn LayoutStrategy>) -> Self {
        let kind = fallback.kind();
        let mut strategies: FxHashMap<LayoutKind, Arc<dyn LayoutStrategy>> = FxHashMap::default();
        strategies.insert(kind, fallback);
        Self {
            strategies,
            fallback: kind,
        }
    }

    pub fn with_defaults() -> Self {
        let mut reg = Self::new(Arc::new(GridStrategy));
        reg.register(Arc::new(RadialStrategy));
        reg
    }

    /// Registers (or replaces) the strategy for its own [`LayoutStrategy::kind`].
    pub fn register(&mut self, strategy: Arc<dyn LayoutStrategy>) {
        self.strategies.insert(strategy.kind(), strategy);
    }

    pub fn get(&self, kind: LayoutKind) -> Result<&dyn LayoutStrategy> {
        self.strategies
            .get(&kind)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::UnknownStrategy {
                kind: kind.to_string(),
            })
    }

    pub fn fallback_kind(&self) -> LayoutKind {
        self.fallback
    }

    pub fn contains(&self, kind: LayoutKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    pub fn list(&self) -> Vec<LayoutKind> {
        let mut kinds: Vec<LayoutKind> = self.strategies.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("kinds", &self.list())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct RouterRegistry {
    routers: BTreeMap<String, Arc<dyn Router>>,
}

impl RouterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `line` (center to center), `line-perimeter` (box edge to box edge) and `ortho`.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.register(
            "line",
            Arc::new(LineRouter {
                anchor: LineAnchor::Center,
            }),
        );
        reg.register(
            "line-perimeter",
            Arc::new(LineRouter {
                anchor: LineAnchor::Perimeter,
            }),
        );
        reg.register("ortho", Arc::new(OrthoRouter));
        reg
    }

    pub fn register(&mut self, name: impl Into<String>, router: Arc<dyn Router>) {
        self.routers.insert(name.into(), router);
    }

    pub fn get(&self, name: &str) -> Result<&dyn Router> {
        self.routers
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| Error::UnknownRouter {
                name: name.to_string(),
            })
    }

    pub fn list(&self) -> Vec<&str> {
        self.routers.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for RouterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterRegistry")
            .field("names", &self.list())
            .finish()
    }
}

/// Turns a raw JSON payload into a typed [`LayoutInput`].
pub type InputAdapter = fn(payload: &Value) -> Result<LayoutInput>;

#[derive(Debug, Clone, Default)]
pub struct InputRegistry {
    adapters: BTreeMap<String, InputAdapter>,
}

impl InputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.insert("tree", tree_adapter);
        reg.insert("graph", graph_adapter);
        reg
    }

    pub fn insert(&mut self, kind: impl Into<String>, adapter: InputAdapter) {
        self.adapters.insert(kind.into(), adapter);
    }

    pub fn get(&self, kind: &str) -> Result<InputAdapter> {
        self.adapters
            .get(kind)
            .copied()
            .ok_or_else(|| Error::UnknownInput {
                kind: kind.to_string(),
            })
    }

    pub fn list(&self) -> Vec<&str> {
        self.adapters.keys().map(String::as_str).collect()
    }
}

/// Accepts `{ "root": { ... } }` or a bare root node object.
fn tree_adapter(payload: &Value) -> Result<LayoutInput> {
    let root = payload.get("root").unwrap_or(payload);
    Ok(LayoutInput::Tree {
        root: serde_json::from_value(root.clone())?,
    })
}

/// Accepts `{ "nodes": [...], "edges": [...] }`.
fn graph_adapter(payload: &Value) -> Result<LayoutInput> {
    #[derive(serde::Deserialize)]
    struct GraphPayload {
        nodes: Vec<nestling_core::GraphNode>,
        #[serde(default)]
        edges: Vec<nestling_core::GraphEdge>,
    }

    let GraphPayload { nodes, edges } = serde_json::from_value(payload.clone())?;
    Ok(LayoutInput::Graph { nodes, edges })
}
