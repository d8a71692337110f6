use std::collections::HashSet;

use chunk_life::sparselife::{SparseLife, SparseLifeConfig};
use rand::RngCore;
use rand::SeedableRng;

fn step_naive(cells: &HashSet<(i64, i64)>) -> HashSet<(i64, i64)> {
    let mut counts = std::collections::HashMap::new();
    for &(x, y) in cells {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    *counts.entry((x + dx, y + dy)).or_insert(0u8) += 1;
                }
            }
        }
    }
    counts
        .into_iter()
        .filter(|&(cell, n)| n == 3 || (n == 2 && cells.contains(&cell)))
        .map(|(cell, _)| cell)
        .collect()
}

fn collect_sparse(engine: &SparseLife) -> HashSet<(i64, i64)> {
    let mut out = HashSet::new();
    engine.for_each_live(|x, y| {
        out.insert((x, y));
    });
    out
}

fn run_parity_case(width: i64, height: i64, density: f64, steps: u64, seed: u64, chunk_size: i64) {
    let mut sparse = SparseLife::with_config(
        SparseLifeConfig::default()
            .chunk_size(chunk_size)
            .thread_count(2)
            .parallel_min_chunks(4),
    )
    .expect("valid config");
    let mut naive = HashSet::new();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;

    for y in -(height / 2)..=(height / 2) {
        for x in -(width / 2)..=(width / 2) {
            if rng.next_u64() <= threshold {
                sparse.set_cell(x, y, true);
                naive.insert((x, y));
            }
        }
    }

    for step in 1..=steps {
        sparse.step();
        naive = step_naive(&naive);
        assert_eq!(
            sparse.population(),
            naive.len() as u64,
            "population mismatch for density {density} seed {seed} chunk {chunk_size} step {step}"
        );
        assert_eq!(
            collect_sparse(&sparse),
            naive,
            "live-set mismatch for density {density} seed {seed} chunk {chunk_size} step {step}"
        );
    }
}

#[test]
fn parity_sparse_mid_dense() {
    run_parity_case(96, 96, 0.10, 6, 0xA1, 64);
    run_parity_case(96, 96, 0.42, 6, 0xB2, 64);
    run_parity_case(96, 96, 0.83, 4, 0xC3, 64);
}

#[test]
fn parity_small_chunks_force_merges() {
    for chunk_size in [2i64, 3, 5, 16] {
        run_parity_case(48, 48, 0.08, 8, 0x5A17 + chunk_size as u64, chunk_size);
        run_parity_case(48, 48, 0.35, 6, 0xD00D + chunk_size as u64, chunk_size);
    }
}

#[test]
fn parity_multiple_seeds() {
    for seed in [11u64, 22, 33, 44] {
        run_parity_case(72, 72, 0.35, 7, seed, 8);
    }
}
