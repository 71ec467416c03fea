//! Index generators shared by the strategies.

use std::f64::consts::TAU;

/// One slot of a row-major arrangement, with its center in unit-square coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Horizontal center in `[0, 1]`.
    pub u: f64,
    /// Vertical center in `[0, 1]`.
    pub v: f64,
}

/// Row-major slots for `count` items on `cols` columns. The unit square is divided into
/// `ceil(count / cols)` equal rows.
pub fn unit_square(count: usize, cols: usize) -> impl Iterator<Item = UnitCell> {
    let cols = cols.max(1);
    let rows = count.div_ceil(cols).max(1);
    (0..count).map(move |index| {
        let row = index / cols;
        let col = index % cols;
        UnitCell {
            index,
            row,
            col,
            u: (col as f64 + 0.5) / cols as f64,
            v: (row as f64 + 0.5) / rows as f64,
        }
    })
}

/// `start + direction * (i / count) * 2π` for `i` in `0..count`.
pub fn angles(count: usize, start: f64, direction: f64) -> impl Iterator<Item = f64> {
    (0..count).map(move |i| start + direction * (i as f64 / count as f64) * TAU)
}
