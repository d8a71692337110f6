//! Chunk registry: routes live cells to chunks and settles merges.
//!
//! Once settled, no two chunks overlap or touch (see [`Bounds::touches`]).
//! Chunk edges always sit on the seed-size grid, so two distinct chunks are
//! separated by at least one full seed width on some axis.

use log::trace;

use super::cell::{Bounds, Cell};
use super::chunk::Chunk;

#[derive(Debug)]
pub struct ChunkRegistry {
    chunks: Vec<Chunk>,
    chunk_size: i64,
}

impl ChunkRegistry {
    pub fn new(chunk_size: i64) -> Self {
        debug_assert!(chunk_size > 0);
        Self {
            chunks: Vec::new(),
            chunk_size,
        }
    }

    /// Build a settled registry holding every cell in `cells`.
    pub fn from_cells<'a, I>(chunk_size: i64, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut registry = Self::new(chunk_size);
        for &cell in cells {
            registry.add(cell);
        }
        registry
    }

    #[inline]
    pub fn chunk_size(&self) -> i64 {
        self.chunk_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Route one live cell, creating and settling a new chunk if no existing
    /// chunk covers it.
    pub fn add(&mut self, cell: Cell) {
        if !self.try_assign(cell) {
            self.insert_or_merge(cell);
        }
    }

    /// Offer `cell` to existing chunks. Chunks are disjoint, so at most one
    /// can accept it.
    pub fn try_assign(&mut self, cell: Cell) -> bool {
        self.chunks.iter_mut().any(|chunk| chunk.add_cell(cell))
    }

    /// Seed a chunk for `cell`, fold in every chunk it touches (directly or
    /// through a previous fold), then register it.
    pub fn insert_or_merge(&mut self, cell: Cell) {
        let mut seed = Chunk::seeded(cell, self.chunk_size);
        // Each absorb can grow the seed into chunks it did not touch before,
        // so the scan restarts from the front after every fold.
        while let Some(i) = self.first_touching(seed.bounds()) {
            let other = self.chunks.swap_remove(i);
            trace!(
                "merge {:?} into {:?} (registry {})",
                other.bounds(),
                seed.bounds(),
                self.chunks.len()
            );
            seed.absorb(&other);
        }
        self.chunks.push(seed);
    }

    fn first_touching(&self, bounds: &Bounds) -> Option<usize> {
        self.chunks
            .iter()
            .position(|chunk| chunk.bounds().touches(bounds))
    }

    /// Live cells across all chunks.
    pub fn population(&self) -> usize {
        self.chunks.iter().map(Chunk::population).sum()
    }

    /// `true` if no pair of chunks overlaps or touches.
    pub fn is_settled(&self) -> bool {
        self.chunks.iter().enumerate().all(|(i, a)| {
            self.chunks[i + 1..]
                .iter()
                .all(|b| !a.bounds().touches(b.bounds()))
        })
    }
}
