#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use chunk_life::sparselife::{SparseLife, SparseLifeConfig};
use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;

/// Random square soups scattered on a sparse lattice of islands, so the
/// registry holds many chunks that never merge.
fn bench_sparse(
    islands: i64,
    island_side: i64,
    density: f64,
    iterations: u64,
    threads: usize,
) -> (f64, u64) {
    let config = SparseLifeConfig::default().thread_count(threads);
    let mut engine = match SparseLife::with_config(config) {
        Ok(engine) => engine,
        Err(e) => panic!("engine setup failed: {e}"),
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED_1234_ABCD_EF01);
    let threshold = (u64::MAX as f64 * density) as u64;
    let spacing = 1024;

    let mut cells = Vec::new();
    for iy in 0..islands {
        for ix in 0..islands {
            for y in 0..island_side {
                for x in 0..island_side {
                    if rng.next_u64() <= threshold {
                        cells.push((ix * spacing + x, iy * spacing + y));
                    }
                }
            }
        }
    }
    engine.set_cells_alive(cells);

    let start = Instant::now();
    engine.step_n(iterations);
    let duration = start.elapsed();

    let total_ms = duration.as_secs_f64() * 1000.0;
    (total_ms, engine.population())
}

fn main() {
    let scales: &[(i64, i64, u64)] = &[
        (1, 64, 50),   // single chunk
        (4, 64, 50),   // 16 islands
        (8, 64, 20),   // 64 islands
        (8, 256, 10),  // 64 larger islands
        (16, 64, 10),  // 256 islands
    ];

    println!(
        "{:<10} {:>8} {:>8} {:>12} {:>10} {:>10}",
        "Islands", "Side", "Iters", "Total(ms)", "Avg(ms)", "Pop"
    );
    println!("{}", "-".repeat(64));

    for &threads in &[1usize, 4] {
        println!("threads = {threads}");
        for &(islands, side, iters) in scales {
            let (total_ms, pop) = bench_sparse(islands, side, 0.35, iters, threads);
            let avg_ms = total_ms / iters as f64;
            println!(
                "{:<10} {:>8} {:>8} {:>12.1} {:>10.4} {:>10}",
                format!("{}x{}", islands, islands),
                side,
                iters,
                total_ms,
                avg_ms,
                pop
            );
        }
    }
}
