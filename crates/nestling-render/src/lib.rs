#![forbid(unsafe_code)]

//! Headless exporters for nestling layout snapshots.
//!
//! Both exporters are pure: they read a [`nestling_core::LayoutSnapshot`] and produce a string or
//! a serializable value. Painting, mounting and I/O stay with the host.

pub mod flow;
pub mod svg;

mod util;

pub use flow::{FlowEdge, FlowGraph, FlowNode, FlowPosition, export_flow, export_flow_json};
pub use svg::{SvgRenderOptions, render_snapshot_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("flow export JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
