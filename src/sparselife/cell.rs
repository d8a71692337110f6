//! Lattice coordinates and half-open chunk rectangles.

/// One lattice position on the unbounded plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Cell {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (i64, i64) {
    #[inline]
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

/// Largest multiple of `size` not exceeding `v`. Floor-based, so negative
/// coordinates land in the block to their left (`-1` aligns to `-size`).
#[inline(always)]
pub fn floor_align(v: i64, size: i64) -> i64 {
    debug_assert!(size > 0);
    v - v.rem_euclid(size)
}

/// Axis-aligned rectangle `[x_start, x_end) x [y_start, y_end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x_start: i64,
    pub y_start: i64,
    pub x_end: i64,
    pub y_end: i64,
}

impl Bounds {
    /// Square of side `size` on the `size`-aligned grid that contains `cell`.
    pub fn seeded(cell: Cell, size: i64) -> Self {
        let x_start = floor_align(cell.x, size);
        let y_start = floor_align(cell.y, size);
        Self {
            x_start,
            y_start,
            x_end: x_start + size,
            y_end: y_start + size,
        }
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.x_end - self.x_start
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.y_end - self.y_start
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.x_start <= cell.x && cell.x < self.x_end && self.y_start <= cell.y && cell.y < self.y_end
    }

    /// Overlap-or-touch test shared by routing and settling.
    ///
    /// Per axis, `max(start_a, start_b) <= min(end_a, end_b)` with half-open
    /// ends: rectangles that overlap, share an edge, or meet only at a corner
    /// all count. A gap of one or more lattice columns (or rows) does not.
    #[inline]
    pub fn touches(&self, other: &Bounds) -> bool {
        self.x_start.max(other.x_start) <= self.x_end.min(other.x_end)
            && self.y_start.max(other.y_start) <= self.y_end.min(other.y_end)
    }

    /// Smallest rectangle covering both.
    #[inline]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x_start: self.x_start.min(other.x_start),
            y_start: self.y_start.min(other.y_start),
            x_end: self.x_end.max(other.x_end),
            y_end: self.y_end.max(other.y_end),
        }
    }
}
