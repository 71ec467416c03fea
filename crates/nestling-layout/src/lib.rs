#![forbid(unsafe_code)]

//! Recursive layout engine for nestling.
//!
//! Each node picks a strategy ([`LayoutKind::Grid`] or [`LayoutKind::Radial`]) and a containment
//! [`Mode`]. [`Engine::compute`] runs parse → validate → plan → place → route → post and returns
//! an immutable [`LayoutSnapshot`].

pub mod audit;
pub mod cache;
pub mod engine;
pub mod frames;
pub mod iter;
pub mod pipeline;
pub mod registry;
pub mod router;
pub mod stats;
pub mod strategy;

pub use audit::audit;
pub use cache::cache_key;
pub use engine::{Placement, PlacementContext, fit_scale, place_tree};
pub use frames::GridFrames;
pub use pipeline::Engine;
pub use registry::{InputAdapter, InputRegistry, RouterRegistry, StrategyRegistry};
pub use router::{LineAnchor, LineRouter, OrthoRouter, Router};
pub use stats::compute_stats;
pub use strategy::{GridStrategy, LayoutStrategy, PlaceRequest, RadialStrategy};

pub use nestling_core::{
    ComputeOptions, Error, LayoutInput, LayoutKind, LayoutSnapshot, Mode, NodeBox, NodeConfig,
    Result,
};
