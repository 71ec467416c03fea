#![forbid(unsafe_code)]

//! Geometry, configuration and data model for `nestling` (headless).
//!
//! Design goals:
//! - typed positions vs sizes (`euclid` units), so the two cannot be mixed silently
//! - immutable, serializable configuration threaded explicitly through every call
//! - deterministic, testable outputs (snapshots rebuilt from scratch on every pass)

pub mod config;
pub mod error;
pub mod geom;
pub mod input;
pub mod model;

pub use config::{
    AngleDirection, ComputeOptions, LimitKind, LimitNotice, LimitPolicy, Limits, LimitsOverride,
    Tuning, TuningOverride, ValidationPolicy,
};
pub use error::{Error, ErrorCategory, Result};
pub use geom::{Point, Rect, Size, SizeExt, Vector, VectorExt, point, rect, size, split_even, vector};
pub use input::{GraphEdge, GraphNode, LayoutInput};
pub use model::{
    AuditIssue, AuditIssueKind, AuditSeverity, LayoutKind, LayoutSnapshot, LayoutStats, Mode,
    NodeBox, NodeConfig, Plan, PlanEntry, SnapshotMeta, ValidationIssue, ValidationIssueKind, Wire,
};
