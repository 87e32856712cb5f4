//! Step-throughput benchmark comparing the serial and parallel passes

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use pocket_life::domain::{Grid, Rule, WrapMode};

const DENSITY: f64 = 0.3;
const SEED: u64 = 42;

fn benchmark_serial(size: usize, iterations: u32) -> f64 {
    let rule = Rule::default();
    let mut grid = Grid::new(size, size, WrapMode::Toroidal).expect("benchmark size is positive");
    grid.randomize(DENSITY, &mut StdRng::seed_from_u64(SEED));

    let start = Instant::now();
    for _ in 0..iterations {
        grid.step(&rule);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_parallel(size: usize, iterations: u32) -> f64 {
    let rule = Rule::default();
    let mut grid = Grid::new(size, size, WrapMode::Toroidal).expect("benchmark size is positive");
    grid.randomize(DENSITY, &mut StdRng::seed_from_u64(SEED));

    let start = Instant::now();
    for _ in 0..iterations {
        grid.step_parallel(&rule);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    env_logger::init();

    println!("=== Pocket Life Step Benchmark ===\n");

    let sizes = [100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>12} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<50}", "");

    for size in sizes {
        let serial_ms = benchmark_serial(size, iterations);
        let parallel_ms = benchmark_parallel(size, iterations);

        println!(
            "{:>12} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!("\n=== Throughput at 2000x2000 ===\n");

    let cells = 2000 * 2000;
    let parallel_ms = benchmark_parallel(2000, iterations);
    println!(
        "Parallel: {:.2} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        (cells as f64) / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
