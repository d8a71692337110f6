//! SparseLife generation driver.
//!
//! Each generation rebuilds a [`ChunkRegistry`] from the current live-cell
//! list (POPULATE), asks every chunk for next-generation cells over its
//! interior and one-cell perimeter (EVOLVE), deduplicates the emission, and
//! drops the registry. Nothing but the deduplicated cell list survives a step.

use log::debug;
use rayon::prelude::*;

use super::cell::Cell;
use super::cell_set::CellSet;
use super::chunk::{Chunk, DEFAULT_CHUNK_SIZE};
use super::registry::ChunkRegistry;
use crate::error::{LifeError, LifeResult};

/// Generation count used by the command-line driver when none is given.
pub const DEFAULT_GENERATIONS: u64 = 10;

/// Smallest accepted seed size. With one-cell seeds two unmerged chunks can
/// sit a single column apart and split a birth's neighborhood between them.
pub const MIN_CHUNK_SIZE: i64 = 2;

/// Below this many chunks EVOLVE runs serially.
const PARALLEL_EVOLVE_MIN_CHUNKS: usize = 8;

/// Configuration for a SparseLife engine instance.
///
/// Use `SparseLifeConfig::default()` for the stock settings, or customise
/// individual knobs via the builder methods.
#[derive(Clone, Debug)]
pub struct SparseLifeConfig {
    /// Side length of freshly seeded chunks.
    pub chunk_size: i64,
    /// Number of threads for the evolve pool.
    /// `None` means rayon's default.
    pub thread_count: Option<usize>,
    /// Minimum registry size before EVOLVE fans out over the pool.
    pub parallel_min_chunks: usize,
}

impl Default for SparseLifeConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            thread_count: None,
            parallel_min_chunks: PARALLEL_EVOLVE_MIN_CHUNKS,
        }
    }
}

impl SparseLifeConfig {
    /// Set the chunk seed size.
    pub fn chunk_size(mut self, size: i64) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set an explicit thread count for the evolve pool.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// Set the registry size at which EVOLVE goes parallel.
    /// `usize::MAX` keeps every step serial.
    pub fn parallel_min_chunks(mut self, n: usize) -> Self {
        self.parallel_min_chunks = n;
        self
    }

    pub fn validate(&self) -> LifeResult<()> {
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(LifeError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}

pub struct SparseLife {
    live: CellSet,
    generation: u64,
    config: SparseLifeConfig,
    pool: rayon::ThreadPool,
    /// Reusable emission buffer for EVOLVE.
    emitted: Vec<Cell>,
}

impl Default for SparseLife {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SparseLife {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseLife")
            .field("generation", &self.generation)
            .field("population", &self.live.len())
            .field("config", &self.config)
            .finish()
    }
}

impl SparseLife {
    /// Engine with default settings and a single-threaded pool.
    pub fn new() -> Self {
        Self::from_parts(
            SparseLifeConfig::default().thread_count(1),
            single_thread_pool(),
        )
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(config: SparseLifeConfig) -> LifeResult<Self> {
        config.validate()?;
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = config.thread_count {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        Ok(Self::from_parts(config, pool))
    }

    fn from_parts(config: SparseLifeConfig, pool: rayon::ThreadPool) -> Self {
        Self {
            live: CellSet::new(),
            generation: 0,
            config,
            pool,
            emitted: Vec::new(),
        }
    }

    pub fn config(&self) -> &SparseLifeConfig {
        &self.config
    }

    pub fn set_cell(&mut self, x: i64, y: i64, alive: bool) {
        let cell = Cell::new(x, y);
        if alive {
            self.live.insert(cell);
        } else {
            self.live.remove(cell);
        }
    }

    /// Batch-set many live cells. Repeats are ignored.
    pub fn set_cells_alive<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let cells = cells.into_iter();
        self.live.reserve_for(self.live.len() + cells.size_hint().0);
        self.live.extend(cells.map(Cell::from));
    }

    pub fn get_cell(&self, x: i64, y: i64) -> bool {
        self.live.contains(Cell::new(x, y))
    }

    /// POPULATE: build a settled registry from the current live cells.
    fn populate(&self) -> ChunkRegistry {
        ChunkRegistry::from_cells(self.config.chunk_size, self.live.iter())
    }

    /// EVOLVE: collect every chunk's next-generation cells into `out`.
    /// Output order follows registry order whether or not the pool is used.
    fn evolve(&self, registry: &ChunkRegistry, out: &mut Vec<Cell>) {
        out.clear();
        if registry.len() < self.config.parallel_min_chunks.max(2) {
            for chunk in registry.iter() {
                chunk.evolve_into(out);
            }
            return;
        }

        let per_chunk: Vec<Vec<Cell>> = self.pool.install(|| {
            registry
                .chunks()
                .par_iter()
                .map(|chunk: &Chunk| {
                    let mut local = Vec::new();
                    chunk.evolve_into(&mut local);
                    local
                })
                .collect()
        });
        out.reserve(per_chunk.iter().map(Vec::len).sum());
        for cells in per_chunk {
            out.extend(cells);
        }
    }

    pub fn step(&mut self) {
        let registry = self.populate();
        let mut emitted = std::mem::take(&mut self.emitted);
        self.evolve(&registry, &mut emitted);
        let chunk_count = registry.len();
        drop(registry);

        self.live.clear();
        self.live.reserve_for(emitted.len());
        self.live.extend(emitted.iter().copied());
        if emitted.len() != self.live.len() {
            debug!(
                "generation {}: dropped {} duplicate emissions",
                self.generation + 1,
                emitted.len() - self.live.len()
            );
        }
        self.emitted = emitted;

        self.generation += 1;
        debug!(
            "generation {}: {} chunks, population {}",
            self.generation,
            chunk_count,
            self.live.len()
        );
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    pub fn population(&self) -> u64 {
        self.live.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// `(min_x, min_y, max_x, max_y)` over live cells, inclusive.
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        let mut min_x = i64::MAX;
        let mut min_y = i64::MAX;
        let mut max_x = i64::MIN;
        let mut max_y = i64::MIN;
        let mut seen = false;

        self.for_each_live(|x, y| {
            seen = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        });

        seen.then_some((min_x, min_y, max_x, max_y))
    }

    pub fn for_each_live<F: FnMut(i64, i64)>(&self, mut f: F) {
        for cell in self.live.iter() {
            f(cell.x, cell.y);
        }
    }

    /// Current live cells, each exactly once.
    pub fn live_cells(&self) -> &[Cell] {
        self.live.as_slice()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn single_thread_pool() -> rayon::ThreadPool {
    // Building a one-thread pool only fails on OS thread-spawn failure.
    rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap_or_else(|e| panic!("failed to build SparseLife thread pool: {e}"))
}

/// Advance `cells` by `generations` steps and return the survivors.
pub fn evolve<I>(cells: I, generations: u64, config: SparseLifeConfig) -> LifeResult<Vec<Cell>>
where
    I: IntoIterator<Item = Cell>,
{
    let mut engine = SparseLife::with_config(config)?;
    engine.set_cells_alive(cells.into_iter().map(<(i64, i64)>::from));
    engine.step_n(generations);
    Ok(engine.live_cells().to_vec())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{SparseLife, SparseLifeConfig, evolve};
    use crate::error::LifeError;
    use crate::sparselife::cell::Cell;

    fn live(engine: &SparseLife) -> HashSet<(i64, i64)> {
        engine.live_cells().iter().map(|&c| c.into()).collect()
    }

    #[test]
    fn rejects_degenerate_chunk_sizes() {
        for size in [-64, 0, 1] {
            let err = SparseLife::with_config(SparseLifeConfig::default().chunk_size(size))
                .expect_err("size should be rejected");
            assert!(matches!(err, LifeError::InvalidChunkSize(s) if s == size));
        }
        assert!(SparseLife::with_config(SparseLifeConfig::default().chunk_size(2)).is_ok());
    }

    #[test]
    fn duplicate_input_counts_once() {
        let mut engine = SparseLife::new();
        engine.set_cells_alive([(0, 0), (0, 0), (1, 0)]);
        engine.set_cell(1, 0, true);
        assert_eq!(engine.population(), 2);
    }

    #[test]
    fn set_cell_false_removes() {
        let mut engine = SparseLife::new();
        engine.set_cells_alive([(0, 0), (1, 0), (2, 0)]);
        engine.set_cell(1, 0, false);
        assert!(!engine.get_cell(1, 0));
        assert_eq!(live(&engine), HashSet::from([(0, 0), (2, 0)]));
    }

    #[test]
    fn step_counts_generations() {
        let mut engine = SparseLife::new();
        engine.step_n(0);
        assert_eq!(engine.generation(), 0);
        engine.step_n(3);
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn parallel_and_serial_evolve_agree_in_order() {
        let cells: Vec<Cell> = (0..20)
            .flat_map(|i| {
                let base = i * 40;
                [(base, 0), (base + 1, 0), (base + 2, 0), (base, 1)]
            })
            .map(Cell::from)
            .collect();

        let serial = SparseLifeConfig::default()
            .chunk_size(8)
            .parallel_min_chunks(usize::MAX);
        let parallel = SparseLifeConfig::default()
            .chunk_size(8)
            .thread_count(4)
            .parallel_min_chunks(2);

        let a = evolve(cells.iter().copied(), 5, serial).expect("serial engine");
        let b = evolve(cells.iter().copied(), 5, parallel).expect("parallel engine");
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn emission_is_deduplicated() {
        let mut engine = SparseLife::new();
        engine.set_cells_alive([(0, 0), (1, 0), (2, 0)]);
        engine.step();
        let cells = engine.live_cells();
        let unique: HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), cells.len());
    }
}
