//! Insertion-ordered set of live cells.
//!
//! An open-addressed linear-probing table keyed by `(x, y)` plus a dense
//! `Vec<Cell>` holding members in first-insertion order. Slots are lazily
//! cleared with an epoch stamp, so each generation can start a fresh set
//! without touching the full backing array.

use super::cell::Cell;

const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

#[derive(Clone, Copy)]
#[repr(C)]
struct Slot {
    x: i64,
    y: i64,
    stamp: u32,
}

impl Slot {
    const EMPTY: Self = Self {
        x: 0,
        y: 0,
        stamp: 0,
    };
}

#[inline(always)]
fn cell_hash(cell: Cell) -> u64 {
    const MX: u64 = 0x517c_c1b7_2722_0a95;
    const MY: u64 = 0x6c62_272e_07bb_0142;
    let hx = (cell.x as u64).wrapping_mul(MX);
    let hy = (cell.y as u64).wrapping_mul(MY);
    hx ^ hy.rotate_right(32)
}

#[inline]
fn slots_for(keys: usize) -> usize {
    keys.saturating_mul(LOAD_DEN)
        .div_ceil(LOAD_NUM)
        .next_power_of_two()
        .max(16)
}

#[derive(Clone)]
pub struct CellSet {
    slots: Vec<Slot>,
    mask: usize,
    stamp: u32,
    cells: Vec<Cell>,
}

impl Default for CellSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CellSet {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let slots = slots_for(cap);
        Self {
            slots: vec![Slot::EMPTY; slots],
            mask: slots - 1,
            stamp: 1,
            cells: Vec::with_capacity(cap),
        }
    }

    /// Forget every member in O(1) (amortized).
    #[inline]
    pub fn clear(&mut self) {
        self.cells.clear();
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamp = 1;
            for slot in &mut self.slots {
                slot.stamp = 0;
            }
        }
    }

    #[inline]
    pub fn reserve_for(&mut self, keys: usize) {
        if keys == 0 {
            return;
        }
        let needed = slots_for(keys);
        if needed > self.slots.len() {
            self.resize(needed);
        }
        self.cells.reserve(keys.saturating_sub(self.cells.len()));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Members in first-insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    #[inline(always)]
    fn needs_grow(&self) -> bool {
        self.cells.len() * LOAD_DEN >= self.slots.len() * LOAD_NUM
    }

    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        self.slots = vec![Slot::EMPTY; new_slots];
        self.mask = new_slots - 1;
        for i in 0..self.cells.len() {
            let cell = self.cells[i];
            let pos = self.probe(cell);
            self.slots[pos] = Slot {
                x: cell.x,
                y: cell.y,
                stamp: self.stamp,
            };
        }
    }

    /// Slot holding `cell`, or the first free slot on its probe path.
    #[inline(always)]
    fn probe(&self, cell: Cell) -> usize {
        let mask = self.mask;
        let mut pos = cell_hash(cell) as usize & mask;
        loop {
            let slot = &self.slots[pos];
            if slot.stamp != self.stamp || (slot.x == cell.x && slot.y == cell.y) {
                return pos;
            }
            pos = (pos + 1) & mask;
        }
    }

    /// Insert a cell.
    /// Returns `true` if newly inserted, `false` if it already existed.
    #[inline]
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.needs_grow() {
            self.resize((self.slots.len() * 2).max(16));
        }

        let pos = self.probe(cell);
        let slot = &mut self.slots[pos];
        if slot.stamp == self.stamp {
            return false;
        }
        *slot = Slot {
            x: cell.x,
            y: cell.y,
            stamp: self.stamp,
        };
        self.cells.push(cell);
        true
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.slots[self.probe(cell)].stamp == self.stamp
    }

    /// Drop `cell` if present. O(len): rebuilds the table to keep probe
    /// chains intact.
    pub fn remove(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return false;
        }
        let mut kept = std::mem::take(&mut self.cells);
        kept.retain(|&c| c != cell);
        self.clear();
        self.cells = Vec::with_capacity(kept.len());
        for c in kept {
            self.insert(c);
        }
        true
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0.max(16));
        set.extend(iter);
        set
    }
}
