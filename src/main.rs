use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use selectio::config::EnvironmentConfig;
use selectio::server::{self, AppState};
use selectio::simulation::Simulation;
use selectio::stats::Accumulator;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a simulation headlessly and log per-generation statistics.
    Run {
        #[arg(long, default_value_t = 50)]
        generations: usize,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serve the simulation HTTP API.
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    match args.command {
        Command::Run {
            generations,
            config,
        } => run_headless(generations, config)?,
        Command::Serve { port } => serve(port)?,
    }

    Ok(())
}

fn run_headless(generations: usize, config: Option<PathBuf>) -> Result<()> {
    let cfg = match config {
        Some(file) => EnvironmentConfig::from_file(file).context("failed to load config")?,
        None => EnvironmentConfig::default(),
    };
    log::info!("{cfg:#?}");

    let mut sim = Simulation::new(cfg).context("failed to construct simulation")?;

    let mut avg_fitness_acc = Accumulator::new();
    for _ in 0..generations {
        let stats = sim.step(1);
        avg_fitness_acc.add(stats.avg_fitness);

        log::info!(
            "gen {:>5} | N = {:>6} | avg fitness = {:.4} | best fitness = {:.4} | best genotype = {:+.4}",
            stats.generation,
            stats.population_size,
            stats.avg_fitness,
            stats.best_fitness,
            stats.best_genotype,
        );
    }

    log::info!(
        "avg fitness over run: mean = {:.4}, std dev = {:.4}",
        avg_fitness_acc.mean(),
        avg_fitness_acc.std_dev(),
    );

    Ok(())
}

fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let state = AppState::default();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(server::serve(addr, state))
}
