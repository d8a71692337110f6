//! Chunk: a dense live/dead matrix over one rectangle of the plane.
//!
//! `cells` is column-major: local `(lx, ly)` lives at `lx * height + ly`, so
//! `cells[lx][ly]` in matrix terms is alive iff global
//! `(x_start + lx, y_start + ly)` is alive.

use super::cell::{Bounds, Cell};

/// Default seed side length for freshly created chunks.
pub const DEFAULT_CHUNK_SIZE: i64 = 64;

/// Any count past this behaves the same: too many to survive or be born.
const CROWDED: u8 = 3;

#[derive(Clone, Debug)]
pub struct Chunk {
    bounds: Bounds,
    cells: Vec<bool>,
}

impl Chunk {
    /// Seed a `size`-square chunk on the aligned grid through `cell` and mark
    /// `cell` alive.
    pub fn seeded(cell: Cell, size: i64) -> Self {
        let mut chunk = Self::empty(Bounds::seeded(cell, size));
        chunk.add_cell(cell);
        chunk
    }

    /// All-dead chunk covering `bounds`.
    pub fn empty(bounds: Bounds) -> Self {
        debug_assert!(bounds.width() > 0 && bounds.height() > 0);
        let len = bounds.width() as usize * bounds.height() as usize;
        Self {
            bounds,
            cells: vec![false; len],
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
    }

    #[inline(always)]
    fn index(&self, local_x: i64, local_y: i64) -> usize {
        local_x as usize * self.height() as usize + local_y as usize
    }

    #[inline(always)]
    fn within_local_bounds(&self, local_x: i64, local_y: i64) -> bool {
        (0..self.width()).contains(&local_x) && (0..self.height()).contains(&local_y)
    }

    /// Mark `cell` alive if it falls inside this chunk.
    /// Returns `false` and leaves the chunk untouched otherwise.
    pub fn add_cell(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return false;
        }
        let i = self.index(cell.x - self.bounds.x_start, cell.y - self.bounds.y_start);
        self.cells[i] = true;
        true
    }

    /// State at local coordinates; anything outside the matrix is dead.
    #[inline]
    pub fn is_alive_local(&self, local_x: i64, local_y: i64) -> bool {
        self.within_local_bounds(local_x, local_y) && self.cells[self.index(local_x, local_y)]
    }

    /// State at global coordinates; anything outside the chunk is dead.
    #[inline]
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.is_alive_local(cell.x - self.bounds.x_start, cell.y - self.bounds.y_start)
    }

    /// Live cells among the 8 neighbors of local `(local_x, local_y)`, counting
    /// only this chunk's own matrix. The scan window is clamped to the matrix,
    /// so perimeter offsets (`-1`, `width`, `height`) are valid inputs.
    ///
    /// Stops counting once the total passes 3.
    pub fn coalesce_neighbors(&self, local_x: i64, local_y: i64) -> u8 {
        let min_x = (local_x - 1).max(0);
        let max_x = (local_x + 1).min(self.width() - 1);
        let min_y = (local_y - 1).max(0);
        let max_y = (local_y + 1).min(self.height() - 1);

        let mut total = 0u8;
        for x in min_x..=max_x {
            let column = self.index(x, 0);
            for y in min_y..=max_y {
                if x == local_x && y == local_y {
                    continue;
                }
                if self.cells[column + y as usize] {
                    total += 1;
                    if total > CROWDED {
                        return total;
                    }
                }
            }
        }
        total
    }

    /// B3/S23 next state for local `(local_x, local_y)`, interior or perimeter.
    pub fn cell_update(&self, local_x: i64, local_y: i64) -> bool {
        let neighbors = self.coalesce_neighbors(local_x, local_y);
        if neighbors == 3 {
            return true;
        }
        neighbors == 2 && self.is_alive_local(local_x, local_y)
    }

    /// Grow to the union rectangle and take over `other`'s live cells.
    pub fn absorb(&mut self, other: &Chunk) {
        let union = self.bounds.union(&other.bounds);
        let mut grown = Chunk::empty(union);
        grown.blit(self);
        grown.blit(other);
        *self = grown;
    }

    /// Copy `src`'s live cells into `self` at their global positions.
    /// `src` must lie inside `self`.
    fn blit(&mut self, src: &Chunk) {
        let dx = src.bounds.x_start - self.bounds.x_start;
        let dy = src.bounds.y_start - self.bounds.y_start;
        debug_assert!(dx >= 0 && dy >= 0);
        debug_assert!(src.bounds.x_end <= self.bounds.x_end);
        debug_assert!(src.bounds.y_end <= self.bounds.y_end);

        let src_height = src.height() as usize;
        for (src_x, column) in src.cells.chunks_exact(src_height).enumerate() {
            let base = self.index(src_x as i64 + dx, dy);
            for (src_y, &alive) in column.iter().enumerate() {
                if alive {
                    self.cells[base + src_y] = true;
                }
            }
        }
    }

    /// Scan the interior plus the one-cell ring around it and push every
    /// cell that is alive next generation, in global coordinates.
    pub fn evolve_into(&self, out: &mut Vec<Cell>) {
        let Bounds {
            x_start, y_start, ..
        } = self.bounds;
        for x in -1..=self.width() {
            for y in -1..=self.height() {
                if self.cell_update(x, y) {
                    out.push(Cell::new(x_start + x, y_start + y));
                }
            }
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn for_each_live<F: FnMut(Cell)>(&self, mut f: F) {
        let height = self.height() as usize;
        for (x, column) in self.cells.chunks_exact(height).enumerate() {
            for (y, &alive) in column.iter().enumerate() {
                if alive {
                    f(Cell::new(
                        self.bounds.x_start + x as i64,
                        self.bounds.y_start + y as i64,
                    ));
                }
            }
        }
    }
}
