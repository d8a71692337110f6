#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::{self, BufWriter};
use std::time::Instant;

use chunk_life::life106;
use chunk_life::sparselife::{DEFAULT_GENERATIONS, SparseLife, SparseLifeConfig};
use chunk_life::{LifeError, LifeResult};
use log::info;

const USAGE: &str = "usage: chunk-life [--generations N] [--chunk-size N] [--threads N] < cells.txt";

struct MainArgs {
    config: SparseLifeConfig,
    generations: u64,
}

enum Command {
    Run(MainArgs),
    Help,
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> LifeResult<T> {
    let raw = args
        .get(i)
        .ok_or_else(|| LifeError::Usage(format!("{flag} requires a value\n{USAGE}")))?;
    raw.parse()
        .map_err(|_| LifeError::Usage(format!("{flag}: invalid value {raw:?}\n{USAGE}")))
}

fn parse_args(args: &[String]) -> LifeResult<Command> {
    let mut config = SparseLifeConfig::default();
    let mut generations = DEFAULT_GENERATIONS;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--generations" | "-g" => {
                i += 1;
                generations = parse_number(args, i, "--generations")?;
            }
            "--chunk-size" => {
                i += 1;
                config = config.chunk_size(parse_number(args, i, "--chunk-size")?);
            }
            "--threads" => {
                i += 1;
                let n: usize = parse_number(args, i, "--threads")?;
                config = config.thread_count(n);
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                return Err(LifeError::Usage(format!(
                    "unknown argument: {other}\n{USAGE}"
                )));
            }
        }
        i += 1;
    }
    Ok(Command::Run(MainArgs {
        config,
        generations,
    }))
}

fn run(args: MainArgs) -> LifeResult<()> {
    let cells = life106::read_cells(io::stdin().lock())?;
    info!(
        "read {} cells; advancing {} generations (chunk size {})",
        cells.len(),
        args.generations,
        args.config.chunk_size
    );

    let mut engine = SparseLife::with_config(args.config)?;
    engine.set_cells_alive(cells.into_iter().map(<(i64, i64)>::from));

    let start = Instant::now();
    engine.step_n(args.generations);
    info!(
        "generation {}: population {} in {:.3} ms",
        engine.generation(),
        engine.population(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    life106::write_cells(BufWriter::new(io::stdout().lock()), engine.live_cells())
}

fn main() -> LifeResult<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Run(args) => run(args),
    }
}
