use crate::geom::{Size, SizeExt, Vector, vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Sweep direction for angular placement on a y-down screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AngleDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl AngleDirection {
    pub fn sign(self) -> f64 {
        match self {
            AngleDirection::Clockwise => 1.0,
            AngleDirection::CounterClockwise => -1.0,
        }
    }
}

/// Layout heuristics. Every derived quantity is a pure function of these fields, which keeps the
/// whole engine deterministic for a given `Tuning`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tuning {
    /// Nested container border padding, as a multiple of spacing.
    pub outer_pad_ratio: f64,
    /// Grid cell / radial sibling padding, as a multiple of spacing.
    pub item_pad_ratio: f64,
    /// Gap between a Graph parent's bottom edge and its child block, as a multiple of spacing.
    pub graph_anchor_gap_ratio: f64,
    /// Angle of the first radial child, radians. `-π/2` is 12 o'clock on a y-down screen.
    pub start_angle: f64,
    pub direction: AngleDirection,
    pub radial_base_ratio: f64,
    pub radial_base_gap_ratio: f64,
    /// Extra radius per tree level for Radial/Graph rings.
    pub radial_level_scale: f64,
    pub min_radius_ratio: f64,
    /// Per-level geometric shrink of the unit node size inside Nested containers.
    pub nested_shrink: f64,
    pub nested_scale_floor: f64,
    /// Largest share of the inner diameter a single Radial/Nested child may take.
    pub nested_child_max_fraction: f64,
    pub fit_scale_floor: f64,
    /// Allowed deviation of `width / height` from 1 before the audit flags a nested child.
    pub square_tolerance: f64,
    /// Pixels a nested child may poke outside its parent's content rectangle.
    pub containment_tolerance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            outer_pad_ratio: 1.0,
            item_pad_ratio: 0.5,
            graph_anchor_gap_ratio: 1.25,
            start_angle: -FRAC_PI_2,
            direction: AngleDirection::Clockwise,
            radial_base_ratio: 1.0,
            radial_base_gap_ratio: 2.0,
            radial_level_scale: 0.5,
            min_radius_ratio: 0.5,
            nested_shrink: 0.85,
            nested_scale_floor: 0.25,
            nested_child_max_fraction: 0.5,
            fit_scale_floor: 0.05,
            square_tolerance: 0.5,
            containment_tolerance: 1.0,
        }
    }
}

impl Tuning {
    pub fn with_override(&self, o: &TuningOverride) -> Tuning {
        Tuning {
            outer_pad_ratio: o.outer_pad_ratio.unwrap_or(self.outer_pad_ratio),
            item_pad_ratio: o.item_pad_ratio.unwrap_or(self.item_pad_ratio),
            graph_anchor_gap_ratio: o
                .graph_anchor_gap_ratio
                .unwrap_or(self.graph_anchor_gap_ratio),
            start_angle: o.start_angle.unwrap_or(self.start_angle),
            direction: o.direction.unwrap_or(self.direction),
            radial_base_ratio: o.radial_base_ratio.unwrap_or(self.radial_base_ratio),
            radial_base_gap_ratio: o.radial_base_gap_ratio.unwrap_or(self.radial_base_gap_ratio),
            radial_level_scale: o.radial_level_scale.unwrap_or(self.radial_level_scale),
            min_radius_ratio: o.min_radius_ratio.unwrap_or(self.min_radius_ratio),
            nested_shrink: o.nested_shrink.unwrap_or(self.nested_shrink),
            nested_scale_floor: o.nested_scale_floor.unwrap_or(self.nested_scale_floor),
            nested_child_max_fraction: o
                .nested_child_max_fraction
                .unwrap_or(self.nested_child_max_fraction),
            fit_scale_floor: o.fit_scale_floor.unwrap_or(self.fit_scale_floor),
            square_tolerance: o.square_tolerance.unwrap_or(self.square_tolerance),
            containment_tolerance: o.containment_tolerance.unwrap_or(self.containment_tolerance),
        }
    }

    pub fn outer_pad(&self, spacing: f64) -> f64 {
        (spacing * self.outer_pad_ratio).max(0.0)
    }

    pub fn item_pad(&self, spacing: f64) -> f64 {
        (spacing * self.item_pad_ratio).max(0.0)
    }

    /// Smallest near-square arrangement for `count` items: `(rows, cols)` with
    /// `rows = ceil(sqrt(count))` and `cols = ceil(count / rows)`.
    pub fn grid_shape(&self, count: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let mut rows = (count as f64).sqrt().ceil() as usize;
        while rows > 1 && (rows - 1) * (rows - 1) >= count {
            rows -= 1;
        }
        while rows * rows < count {
            rows += 1;
        }
        (rows, count.div_ceil(rows))
    }

    /// Offset from a Graph parent's center to the top-center of its child block.
    pub fn graph_anchor_offset(&self, parent: Size, spacing: f64) -> Vector {
        vector(0.0, parent.height / 2.0 + self.graph_anchor_gap_ratio * spacing)
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn direction(&self) -> f64 {
        self.direction.sign()
    }

    pub fn radial_base(&self, node_size: Size, spacing: f64) -> f64 {
        node_size.max_side() * self.radial_base_ratio + spacing * self.radial_base_gap_ratio
    }

    pub fn radial_ring_radius(&self, node_size: Size, spacing: f64, level: usize) -> f64 {
        self.radial_base(node_size, spacing) * (1.0 + level as f64 * self.radial_level_scale)
    }

    pub fn min_radius(&self, spacing: f64) -> f64 {
        (spacing * self.min_radius_ratio).max(1.0)
    }

    pub fn nested_node_scale(&self, level: usize) -> f64 {
        let exp = i32::try_from(level).unwrap_or(i32::MAX);
        self.nested_shrink.powi(exp).max(self.nested_scale_floor)
    }

    pub fn nested_unit_size(&self, node_size: Size, level: usize) -> Size {
        node_size.scale(self.nested_node_scale(level))
    }
}

/// Per-call partial override of [`Tuning`]; unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TuningOverride {
    pub outer_pad_ratio: Option<f64>,
    pub item_pad_ratio: Option<f64>,
    pub graph_anchor_gap_ratio: Option<f64>,
    pub start_angle: Option<f64>,
    pub direction: Option<AngleDirection>,
    pub radial_base_ratio: Option<f64>,
    pub radial_base_gap_ratio: Option<f64>,
    pub radial_level_scale: Option<f64>,
    pub min_radius_ratio: Option<f64>,
    pub nested_shrink: Option<f64>,
    pub nested_scale_floor: Option<f64>,
    pub nested_child_max_fraction: Option<f64>,
    pub fit_scale_floor: Option<f64>,
    pub square_tolerance: Option<f64>,
    pub containment_tolerance: Option<f64>,
}
