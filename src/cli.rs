use clap::{Parser, Subcommand};

use crate::config::ServerArgs;
use crate::core::{
    EntropySource, Simulation, SimulationError, SimulationInput, render_table, simulate,
};

#[derive(Parser, Debug)]
#[command(
    name = "pamm-site",
    about = "PAMM marketing site and twelve-month return simulator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the website and the news/testimonial API proxies.
    Serve(ServerArgs),
    /// Simulate twelve months of randomized returns for an amount.
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(
        allow_hyphen_values = true,
        help = "Initial investment in USD, e.g. 1000"
    )]
    pub amount: String,
    #[arg(long, help = "Seed for a reproducible run")]
    pub seed: Option<u64>,
    #[arg(long, help = "Print the run as JSON instead of a table")]
    pub json: bool,
}

/// Validates the amount text and runs one simulation.
pub fn run_simulation(args: &SimulateArgs) -> Result<Simulation, SimulationError> {
    let input: SimulationInput = args.amount.parse()?;
    let mut source = EntropySource::from_seed(args.seed);
    Ok(simulate(input, &mut source))
}

pub fn render_simulation(sim: &Simulation, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(sim)
    } else {
        Ok(render_table(sim))
    }
}
