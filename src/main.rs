use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lattice_automata::application::config::{
    BrainSection, LatticeSection, LifeSection, LogisticInit, LogisticSection,
};
use lattice_automata::{RunConfig, application::Automaton, execute, rendering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lattice cellular automata: Game of Life, Brian's Brain, Logistic CA")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print every frame instead of one summary line per step
    #[arg(long, global = true)]
    frames: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a TOML run description
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Conway's Game of Life on a toroidal Moore lattice
    Life {
        /// Predefined system 1..=17, or 0 for a random grid
        #[arg(long, default_value_t = 0)]
        system: usize,
        /// Predefined system by name, e.g. glider or acorn
        #[arg(long, conflicts_with = "system")]
        pattern: Option<String>,
        /// Alive density for random grids
        #[arg(short, long, default_value_t = 0.5)]
        p: f64,
        #[arg(short = 'L', long, default_value_t = 50)]
        size: i64,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Brian's Brain
    Brain {
        #[command(flatten)]
        lattice: LatticeArgs,
        #[arg(long, default_value_t = 2)]
        lambda: u32,
        /// One of =, >=, <=, >, <
        #[arg(long, default_value = "=")]
        firing_rule: String,
        #[arg(long, default_value_t = 1)]
        t_refrac: u32,
        #[arg(long, default_value_t = 1.0 / 3.0)]
        dq: f64,
        #[arg(long, default_value_t = 1.0 / 3.0)]
        df: f64,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Logistic-map cellular automaton
    Logistic {
        #[command(flatten)]
        lattice: LatticeArgs,
        #[arg(long, default_value_t = 4.0)]
        rate: f64,
        /// Seed with Beta(a, b) (or mean mu, precision nu) instead of uniform values
        #[arg(long)]
        beta: bool,
        #[arg(long)]
        a: Option<f64>,
        #[arg(long)]
        b: Option<f64>,
        #[arg(long)]
        mu: Option<f64>,
        #[arg(long)]
        nu: Option<f64>,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug)]
struct LatticeArgs {
    #[arg(short = 'L', long, default_value_t = 50)]
    size: i64,
    /// toroidal or spherical
    #[arg(long, default_value = "toroidal")]
    lattice: String,
    /// Moore or vonNeumann
    #[arg(long, default_value = "Moore")]
    neighborhood: String,
    /// inner or outer
    #[arg(long, default_value = "outer")]
    totalistic: String,
    /// Neighborhood radius (only 1 is supported)
    #[arg(short, long, default_value_t = 1)]
    radius: i64,
}

impl From<LatticeArgs> for LatticeSection {
    fn from(args: LatticeArgs) -> Self {
        Self {
            size: args.size,
            topology: args.lattice,
            neighborhood: args.neighborhood,
            totalistic: args.totalistic,
            radius: args.radius,
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Steps to run (defaults: 30, or 50 for the Logistic CA)
    #[arg(short, long)]
    duration: Option<u64>,
    #[arg(short, long, default_value_t = 17)]
    seed: u64,
    /// serial or parallel
    #[arg(long, default_value = "parallel")]
    algorithm: String,
}

impl RunArgs {
    fn apply(self, config: &mut RunConfig) {
        config.duration = self.duration;
        config.seed = self.seed;
        config.algorithm = self.algorithm;
    }
}

fn build_config(command: Command) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::default();
    match command {
        Command::Run { config: path } => {
            return RunConfig::load(&path)
                .with_context(|| format!("loading run description {}", path.display()));
        }
        Command::Life { system, pattern, p, size, run } => {
            config.automaton = Automaton::GameOfLife;
            config.life = LifeSection {
                system,
                pattern,
                p,
                ..LifeSection::default()
            };
            config.lattice.size = size;
            run.apply(&mut config);
        }
        Command::Brain { lattice, lambda, firing_rule, t_refrac, dq, df, run } => {
            config.automaton = Automaton::BriansBrain;
            config.lattice = lattice.into();
            config.brain = BrainSection {
                lambda,
                firing_rule,
                refractory_period: t_refrac,
                dq,
                df,
            };
            run.apply(&mut config);
        }
        Command::Logistic { lattice, rate, beta, a, b, mu, nu, run } => {
            config.automaton = Automaton::Logistic;
            config.lattice = lattice.into();
            config.logistic = LogisticSection {
                rate,
                init: if beta { LogisticInit::Beta } else { LogisticInit::Uniform },
                a,
                b,
                mu,
                nu,
            };
            run.apply(&mut config);
        }
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "lattice_automata=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = build_config(cli.command)?;
    let snapshots = execute(&config).context("simulation run failed")?;

    if cli.frames {
        print!("{}", rendering::render_all(&snapshots));
    } else {
        for line in rendering::summarize(&snapshots) {
            println!("{line}");
        }
    }
    Ok(())
}
