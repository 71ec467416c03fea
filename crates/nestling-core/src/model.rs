use crate::config::LimitNotice;
use crate::geom::{Point, Rect, Size, point, rect_center};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial strategy a node uses for its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Grid,
    Radial,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Radial => "radial",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Containment mode of a node toward its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Children are independent boxes joined to the parent by wires.
    #[default]
    Graph,
    /// Children are placed inside the parent's interior; no wires.
    Nested,
}

/// Declarative tree input. The engine never mutates it; overrides are stamped on a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Absolute top-left position. Only honored for the placement root.
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub children: Vec<NodeConfig>,
    #[serde(default)]
    pub layout: Option<LayoutKind>,
    #[serde(default)]
    pub mode: Option<Mode>,
}

impl NodeConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            position: None,
            children: Vec::new(),
            layout: None,
            mode: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(point(x, y));
        self
    }

    pub fn with_children(mut self, children: Vec<NodeConfig>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: NodeConfig) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn nested(self, layout: LayoutKind) -> Self {
        self.with_layout(layout).with_mode(Mode::Nested)
    }

    /// Distance from this node to its deepest descendant (a leaf has depth 0).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&NodeConfig, usize)> = vec![(self, 0)];
        while let Some((n, d)) = stack.pop() {
            max = max.max(d);
            for c in &n.children {
                stack.push((c, d + 1));
            }
        }
        max
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_, _| count += 1);
        count
    }

    /// Pre-order walk with depth.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a NodeConfig, usize)) {
        fn walk<'a>(n: &'a NodeConfig, depth: usize, f: &mut impl FnMut(&'a NodeConfig, usize)) {
            f(n, depth);
            for c in &n.children {
                walk(c, depth + 1, f);
            }
        }
        walk(self, 0, f);
    }
}

/// Absolute geometry of one placed node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBox {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Absolute top-left corner.
    pub position: Point,
    pub size: Size,
    /// Set only when the box sits inside its parent (Nested containment).
    #[serde(default)]
    pub parent_id: Option<String>,
    pub depth: usize,
}

impl NodeBox {
    pub fn new(id: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            label: None,
            position,
            size,
            parent_id: None,
            depth: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> Point {
        rect_center(&self.rect())
    }
}

/// A Graph-mode parent→child connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Explicit polyline. `None` means implicit center-to-center connectivity.
    #[serde(default)]
    pub points: Option<Vec<Point>>,
}

impl Wire {
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: format!("{source}->{target}"),
            source: source.to_string(),
            target: target.to_string(),
            points: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub max_depth: usize,
    /// Union of all boxes; a zero rectangle at the origin when there are none.
    pub bounds: Rect,
    /// Unordered overlapping id pairs, present only when collection was requested.
    #[serde(default)]
    pub overlaps: Option<Vec<(String, String)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub layout: LayoutKind,
    pub mode: Mode,
}

/// Effective layout kind and mode per node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub entries: IndexMap<String, PlanEntry>,
}

impl Plan {
    pub fn insert(&mut self, id: impl Into<String>, entry: PlanEntry) {
        self.entries.insert(id.into(), entry);
    }

    /// Resolved entry for `id`; unknown ids fall back to Grid/Graph.
    pub fn resolve(&self, id: &str) -> PlanEntry {
        self.entries.get(id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationIssueKind {
    DuplicateId,
    SelfLoop,
    MissingEndpoint,
}

/// Structural input defect. Collected, never raised on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub kind: ValidationIssueKind,
    /// Offending node or edge id.
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuditSeverity {
    Warning,
    Violation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuditIssueKind {
    NotSquare,
    OversizedChild,
    OutsideParent,
    SiblingOverlap,
    OffRing,
}

/// Advisory geometric finding about a nested parent/child pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditIssue {
    pub severity: AuditSeverity,
    pub kind: AuditIssueKind,
    pub parent_id: String,
    pub child_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub plan: Plan,
    #[serde(default)]
    pub validation: Vec<ValidationIssue>,
    #[serde(default)]
    pub audit: Vec<AuditIssue>,
    #[serde(default)]
    pub notices: Vec<LimitNotice>,
    #[serde(default)]
    pub router: Option<String>,
}

/// Immutable output of one placement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// Boxes in placement (pre-)order, keyed by node id.
    pub boxes: IndexMap<String, NodeBox>,
    pub wires: Vec<Wire>,
    pub stats: LayoutStats,
    pub version: u64,
    #[serde(default)]
    pub meta: Option<SnapshotMeta>,
}

impl LayoutSnapshot {
    pub fn node(&self, id: &str) -> Option<&NodeBox> {
        self.boxes.get(id)
    }

    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a NodeBox> {
        self.boxes
            .values()
            .filter(move |b| b.parent_id.as_deref() == Some(parent_id))
    }

    /// Equality on everything except the version token.
    pub fn same_layout(&self, other: &LayoutSnapshot) -> bool {
        self.boxes == other.boxes
            && self.wires == other.wires
            && self.stats == other.stats
            && self.meta == other.meta
    }
}
