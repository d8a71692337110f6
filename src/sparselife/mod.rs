//! SparseLife engine internals and public API.

mod cell;
mod cell_set;
mod chunk;
mod engine;
mod registry;

pub use cell::{Bounds, Cell, floor_align};
pub use cell_set::CellSet;
pub use chunk::{Chunk, DEFAULT_CHUNK_SIZE};
pub use engine::{DEFAULT_GENERATIONS, MIN_CHUNK_SIZE, SparseLife, SparseLifeConfig, evolve};
pub use registry::ChunkRegistry;
