//! Step timings, serial vs parallel, for each automaton

use std::time::Instant;

use lattice_automata::domain::seeding::{self, BrainDensities};
use lattice_automata::{
    Algorithm, BriansBrainRule, ConwayRule, Grid, LatticeConfig, LogisticRule, Rule, Simulation,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Average milliseconds per step over `iterations` steps
fn benchmark<R: Rule>(
    config: LatticeConfig,
    rule: R,
    initial: Grid<R::State>,
    algorithm: Algorithm,
    iterations: u32,
) -> anyhow::Result<f64> {
    let mut sim = Simulation::new(config, rule, initial)?.with_algorithm(algorithm);

    let start = Instant::now();
    for _ in 0..iterations {
        sim.step()?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn row(label: &str, size: usize, serial_ms: f64, parallel_ms: f64) {
    println!(
        "{:>14} {:>10} {:>12.2} {:>12.2} {:>9.1}x",
        label,
        format!("{}x{}", size, size),
        serial_ms,
        parallel_ms,
        serial_ms / parallel_ms
    );
}

fn main() -> anyhow::Result<()> {
    println!("=== Lattice Automata Step Benchmark ===\n");
    for algorithm in Algorithm::all() {
        println!("  {:<9} {}", algorithm.name(), algorithm.description());
    }
    println!();

    let sizes = [50, 100, 250, 500, 1000];
    let iterations = 10;

    println!(
        "{:>14} {:>10} {:>12} {:>12} {:>10}",
        "Automaton", "Size", "Serial ms", "Parallel ms", "Speedup"
    );
    println!("{:-<62}", "");

    for size in sizes {
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let life = seeding::random_life(size, 0.5, &mut rng)?;
        let config = LatticeConfig::game_of_life(size)?;
        let serial = benchmark(config, ConwayRule, life.clone(), Algorithm::Serial, iterations)?;
        let parallel = benchmark(config, ConwayRule, life, Algorithm::Parallel, iterations)?;
        row("Life", size, serial, parallel);

        let brain = seeding::random_brain(size, BrainDensities::default(), &mut rng)?;
        let config = LatticeConfig::from_tags(size, "spherical", "Moore", "outer")?;
        let rule = BriansBrainRule::default();
        let serial = benchmark(config, rule, brain.clone(), Algorithm::Serial, iterations)?;
        let parallel = benchmark(config, rule, brain, Algorithm::Parallel, iterations)?;
        row("Brian's Brain", size, serial, parallel);

        let logistic = seeding::uniform(size, &mut rng)?;
        let config = LatticeConfig::from_tags(size, "toroidal", "vonNeumann", "inner")?;
        let rule = LogisticRule::new(3.9)?;
        let serial = benchmark(config, rule, logistic.clone(), Algorithm::Serial, iterations)?;
        let parallel = benchmark(config, rule, logistic, Algorithm::Parallel, iterations)?;
        row("Logistic", size, serial, parallel);
    }

    Ok(())
}
