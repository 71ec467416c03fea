//! Pixel-space geometry primitives.
//!
//! Positions and sizes are distinct `euclid` types sharing the [`Px`] unit: a [`Point`] plus a
//! [`Size`] is a [`Point`], two [`Size`]s add to a [`Size`], and there is no way to add two
//! points. The handful of operations `euclid` does not ship (halve, swap, axis reflection,
//! aspect ratio, rotation by radians) live on [`VectorExt`] and [`SizeExt`].

use serde::{Deserialize, Serialize};

/// Unit tag for layout pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Px;

pub type Point = euclid::Point2D<f64, Px>;
pub type Vector = euclid::Vector2D<f64, Px>;
pub type Size = euclid::Size2D<f64, Px>;
pub type Rect = euclid::Rect<f64, Px>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(point(x, y), size(width, height))
}

/// Converts a size into the vector spanning it (explicit position/size crossing).
pub fn size_to_vector(s: Size) -> Vector {
    vector(s.width, s.height)
}

/// Converts a displacement into a size. Negative components are kept as-is.
pub fn vector_to_size(v: Vector) -> Size {
    size(v.x, v.y)
}

/// Top-left corner of a box of `size` centered on `center`.
pub fn top_left_for_center(center: Point, s: Size) -> Point {
    center - size_to_vector(s.halve())
}

pub fn rect_center(r: &Rect) -> Point {
    point(r.origin.x + r.size.width / 2.0, r.origin.y + r.size.height / 2.0)
}

/// Smallest rectangle covering both inputs.
pub fn rect_union(a: &Rect, b: &Rect) -> Rect {
    let min_x = a.min_x().min(b.min_x());
    let min_y = a.min_y().min(b.min_y());
    let max_x = a.max_x().max(b.max_x());
    let max_y = a.max_y().max(b.max_y());
    rect(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Strict axis-aligned intersection: touching edges do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.max_x() > b.min_x() && b.max_x() > a.min_x() && a.max_y() > b.min_y() && b.max_y() > a.min_y()
}

/// `inner` lies inside `outer`, allowing each edge to poke out by up to `tolerance`.
pub fn rect_contains(outer: &Rect, inner: &Rect, tolerance: f64) -> bool {
    inner.min_x() >= outer.min_x() - tolerance
        && inner.min_y() >= outer.min_y() - tolerance
        && inner.max_x() <= outer.max_x() + tolerance
        && inner.max_y() <= outer.max_y() + tolerance
}

pub trait VectorExt: Sized {
    fn halve(self) -> Self;
    fn swap(self) -> Self;
    /// Mirror across the x axis (negates `y`).
    fn flip_y(self) -> Self;
    /// Mirror across the y axis (negates `x`).
    fn flip_x(self) -> Self;
    /// Scalar 2D cross product `x1*y2 - y1*x2`, computed as `flip_y(self) · swap(other)`.
    fn cross_scalar(self, other: Self) -> f64;
    fn rotate(self, radians: f64) -> Self;
    fn area(self) -> f64;
    fn aspect(self) -> f64;
    fn clamp_each(self, min: f64, max: f64) -> Self;
}

impl VectorExt for Vector {
    fn halve(self) -> Self {
        self / 2.0
    }

    fn swap(self) -> Self {
        vector(self.y, self.x)
    }

    fn flip_y(self) -> Self {
        vector(self.x, -self.y)
    }

    fn flip_x(self) -> Self {
        vector(-self.x, self.y)
    }

    fn cross_scalar(self, other: Self) -> f64 {
        self.flip_y().dot(other.swap())
    }

    fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        vector(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn area(self) -> f64 {
        self.x * self.y
    }

    fn aspect(self) -> f64 {
        self.x / self.y
    }

    fn clamp_each(self, min: f64, max: f64) -> Self {
        vector(self.x.clamp(min, max), self.y.clamp(min, max))
    }
}

pub trait SizeExt: Sized {
    fn halve(self) -> Self;
    fn swap(self) -> Self;
    fn scale(self, k: f64) -> Self;
    fn aspect(self) -> f64;
    fn max_side(self) -> f64;
    fn min_side(self) -> f64;
    /// Removes `pad` from every side, never going below one unit per axis.
    fn deflate(self, pad: f64) -> Self;
    fn at_least(self, min: f64) -> Self;
}

impl SizeExt for Size {
    fn halve(self) -> Self {
        size(self.width / 2.0, self.height / 2.0)
    }

    fn swap(self) -> Self {
        size(self.height, self.width)
    }

    fn scale(self, k: f64) -> Self {
        size(self.width * k, self.height * k)
    }

    fn aspect(self) -> f64 {
        self.width / self.height
    }

    fn max_side(self) -> f64 {
        self.width.max(self.height)
    }

    fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    fn deflate(self, pad: f64) -> Self {
        size(self.width - 2.0 * pad, self.height - 2.0 * pad).at_least(1.0)
    }

    fn at_least(self, min: f64) -> Self {
        size(self.width.max(min), self.height.max(min))
    }
}

/// Splits `total` into `parts` integer-sized pieces that sum exactly to `total`.
///
/// `base = floor(total / parts)`; the first `total - base * parts` pieces get one extra unit.
/// A fractional `total` leaves a sub-unit remainder that is folded into the last piece, so the
/// sum stays exact and the spread stays within one unit.
pub fn split_even(total: f64, parts: usize) -> Vec<f64> {
    if parts == 0 {
        return Vec::new();
    }
    let total = total.max(0.0);
    let n = parts as f64;
    let base = (total / n).floor();
    let rem = total - base * n;
    let extra = (rem.floor() as usize).min(parts);
    let mut out: Vec<f64> = (0..parts)
        .map(|i| if i < extra { base + 1.0 } else { base })
        .collect();
    let frac = rem - extra as f64;
    if frac > 0.0 {
        if let Some(last) = out.last_mut() {
            *last += frac;
        }
    }
    out
}
