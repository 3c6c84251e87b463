//! Uniform bucket grid over a 2D domain for radius-bounded neighbor queries.
//!
//! The grid is an accelerator, not an exact-radius filter: [`SpatialGrid::neighbors_within`]
//! returns every stored index whose cell intersects the query window, and callers perform the
//! exact distance check on the returned candidates.
use std::f32::consts::SQRT_2;

use glam::Vec2;

/// Per-cell storage of sample indices.
pub trait CellStorage: Clone + Default {
    /// Record `index` in this cell.
    fn store(&mut self, index: usize);

    /// Iterate the indices held by this cell.
    fn indices(&self) -> impl Iterator<Item = usize> + '_;
}

/// Single slot holding the most recently inserted index.
impl CellStorage for Option<usize> {
    #[inline]
    fn store(&mut self, index: usize) {
        *self = Some(index);
    }

    #[inline]
    fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().copied()
    }
}

/// Bucket holding every inserted index.
impl CellStorage for Vec<usize> {
    #[inline]
    fn store(&mut self, index: usize) {
        self.push(index);
    }

    #[inline]
    fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().copied()
    }
}

/// Grid keeping only the latest index per cell. Sound whenever at most one sample can occupy a
/// cell, which holds for Poisson-disk sets with `cell_size = min_distance / √2`.
pub type SingleSlotGrid = SpatialGrid<Option<usize>>;

/// Grid keeping every index per cell, for objects of varying footprint.
pub type BucketGrid = SpatialGrid<Vec<usize>>;

/// Uniform grid over `[0, w] × [0, h]` with `ceil(w / cell_size) × ceil(h / cell_size)` cells.
#[derive(Debug, Clone)]
pub struct SpatialGrid<S> {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<S>,
}

impl<S: CellStorage> SpatialGrid<S> {
    /// Create a grid covering `extent` with square cells of `cell_size`.
    pub fn new(extent: Vec2, cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell_size must be > 0");
        let cols = ((extent.x / cell_size).ceil() as usize).max(1);
        let rows = ((extent.y / cell_size).ceil() as usize).max(1);

        Self {
            cell_size,
            cols,
            rows,
            cells: vec![S::default(); cols * rows],
        }
    }

    /// Create a grid sized for a minimum sample spacing (`cell_size = min_distance / √2`).
    pub fn for_min_distance(extent: Vec2, min_distance: f32) -> Self {
        Self::new(extent, min_distance / SQRT_2)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of columns (cells along X).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows (cells along Y).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell `(row, col)` containing `point`, clamped to the grid.
    #[inline]
    pub fn cell_of(&self, point: Vec2) -> (usize, usize) {
        let col = ((point.x / self.cell_size).floor() as isize).clamp(0, self.cols as isize - 1);
        let row = ((point.y / self.cell_size).floor() as isize).clamp(0, self.rows as isize - 1);
        (row as usize, col as usize)
    }

    #[inline]
    fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Store `index` in the cell containing `point`.
    pub fn insert(&mut self, index: usize, point: Vec2) {
        let (row, col) = self.cell_of(point);
        let idx = self.cell_index(row, col);
        self.cells[idx].store(index);
    }

    /// Visit candidate indices near `point` until `visit` returns `false`.
    ///
    /// Scans `±ceil(radius / cell_size)` cells around the point's cell. Returns `false` if the
    /// visit was stopped early.
    pub fn visit_within(
        &self,
        point: Vec2,
        radius: f32,
        mut visit: impl FnMut(usize) -> bool,
    ) -> bool {
        let (row, col) = self.cell_of(point);
        let reach = (radius.max(0.0) / self.cell_size).ceil() as usize;

        let start_row = row.saturating_sub(reach);
        let end_row = (row + reach + 1).min(self.rows);
        let start_col = col.saturating_sub(reach);
        let end_col = (col + reach + 1).min(self.cols);

        for r in start_row..end_row {
            for c in start_col..end_col {
                for index in self.cells[self.cell_index(r, c)].indices() {
                    if !visit(index) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Collect candidate indices near `point` (superset of those within `radius`).
    pub fn neighbors_within(&self, point: Vec2, radius: f32) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_within(point, radius, |index| {
            out.push(index);
            true
        });
        out
    }

    /// Remove all stored indices, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = S::default());
    }
}
