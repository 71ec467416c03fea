#![forbid(unsafe_code)]

//! `nestling` computes absolute pixel geometry for hierarchical node trees.
//!
//! Each node picks a strategy (grid or radial) and a containment mode: Graph children are
//! separate boxes joined by wires, Nested children are placed inside their parent. The result is
//! an immutable [`LayoutSnapshot`] that any rendering backend can consume.
//!
//! # Features
//!
//! - `render`: enable the SVG and flow exporters (`nestling::render`)

pub use nestling_core::*;
pub use nestling_layout::{
    Engine, GridStrategy, InputRegistry, LayoutStrategy, LineAnchor, LineRouter, OrthoRouter,
    RadialStrategy, Router, RouterRegistry, StrategyRegistry,
};

pub mod layout {
    pub use nestling_layout::*;
}

/// Runs [`Engine::compute`] on an engine with default registries and configuration.
pub fn compute(input: &LayoutInput, options: &ComputeOptions) -> Result<LayoutSnapshot> {
    Engine::new().compute(input, options)
}

#[cfg(feature = "render")]
pub mod render {
    pub use nestling_render::flow::{FlowEdge, FlowGraph, FlowNode, FlowPosition};
    pub use nestling_render::{SvgRenderOptions, export_flow, export_flow_json, render_snapshot_svg};

    use nestling_core::{ComputeOptions, LayoutInput};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Layout(#[from] nestling_core::Error),
        #[error(transparent)]
        Render(#[from] nestling_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Lays out `input` and renders the snapshot as a standalone SVG document.
    pub fn render_svg(
        input: &LayoutInput,
        options: &ComputeOptions,
        svg: &SvgRenderOptions,
    ) -> Result<String> {
        let snapshot = crate::compute(input, options)?;
        Ok(render_snapshot_svg(&snapshot, svg))
    }

    /// Lays out `input` and exports the parent-relative node/edge list as JSON.
    pub fn render_flow_json(input: &LayoutInput, options: &ComputeOptions) -> Result<String> {
        let snapshot = crate::compute(input, options)?;
        Ok(export_flow_json(&snapshot)?)
    }
}
