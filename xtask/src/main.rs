//! xtask - Development task runner for persistent-avl
//!
//! Usage:
//!   cargo xtask render [--mode put|lower|upper] <values>...
//!   cargo xtask stress --scenario <yaml> [options]

mod render;
mod stress;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for persistent-avl")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the shape of a tree built from the given values
    Render(render::RenderArgs),
    /// Replay a random operation sequence against a model and check invariants
    Stress(stress::StressArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render::run(&args),
        Commands::Stress(args) => stress::run(&args),
    }
}
