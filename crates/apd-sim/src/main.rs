use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    demo::{self, DemoArgs},
    run::{self, RunArgs},
    solve::{self, SolveArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "apd-sim", about = "Exact APD minimal-exponent experiments", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the minimal exponent for a single matrix read from JSON.
    Solve(SolveArgs),
    /// Run an experiment plan and print per-size statistics.
    Run(RunArgs),
    /// Evaluate the constant and natural-square matrices for small sizes.
    Demo(DemoArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Solve(args) => solve::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Demo(args) => demo::run(&args),
    }
}
