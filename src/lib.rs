//! Conway's Game of Life (B3/S23) on an unbounded plane, simulated with
//! dynamically sized, dynamically merging chunks.

pub mod error;
pub mod life106;
pub mod sparselife;

pub use error::{LifeError, LifeResult};
pub use sparselife::{Cell, SparseLife, SparseLifeConfig};
