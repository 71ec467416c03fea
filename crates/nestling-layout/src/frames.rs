//! Addressable grid of cell rectangles.

use indexmap::IndexMap;
use nestling_core::geom::{Rect, Size, rect, split_even};

/// Row-major cells tiling a content area, addressable by `(row, col)` or by child id.
///
/// Cell rectangles are relative to the content area's top-left. The last row may hold fewer
/// cells than `cols`; its cells are stretched over the full width so the tiling stays exact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFrames {
    rows: usize,
    cols: usize,
    cells: Vec<Rect>,
    by_id: IndexMap<String, usize>,
}

impl GridFrames {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tiles `area` with one cell per id, `cols` per row.
    pub fn tile(ids: &[&str], area: Size, cols: usize) -> Self {
        let count = ids.len();
        if count == 0 {
            return Self::empty();
        }
        let cols = cols.clamp(1, count);
        let rows = count.div_ceil(cols);
        let heights = split_even(area.height, rows);

        let mut cells = Vec::with_capacity(count);
        let mut y = 0.0;
        for (row, h) in heights.iter().copied().enumerate() {
            let in_row = (count - row * cols).min(cols);
            let mut x = 0.0;
            for w in split_even(area.width, in_row) {
                cells.push(rect(x, y, w, h));
                x += w;
            }
            y += h;
        }

        let mut by_id = IndexMap::with_capacity(count);
        for (i, id) in ids.iter().enumerate() {
            by_id.entry((*id).to_string()).or_insert(i);
        }

        Self {
            rows,
            cols,
            cells,
            by_id,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&Rect> {
        self.cells.get(index)
    }

    pub fn at(&self, row: usize, col: usize) -> Option<&Rect> {
        if col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn get(&self, id: &str) -> Option<&Rect> {
        self.by_id.get(id).and_then(|&i| self.cells.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rect)> {
        self.by_id
            .iter()
            .filter_map(|(id, &i)| self.cells.get(i).map(|r| (id.as_str(), r)))
    }

    pub fn cells(&self) -> &[Rect] {
        &self.cells
    }
}
