use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pamm_site::cli::{Cli, Command, render_simulation, run_simulation};
use pamm_site::config::Config;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => {
            let config = Config::from_args(args).map_err(anyhow::Error::msg)?;
            info!(port = config.port, data_dir = %config.data_dir.display(), "starting server");
            pamm_site::api::run_http_server(config).await
        }
        Command::Simulate(args) => match run_simulation(&args) {
            Ok(sim) => {
                println!("{}", render_simulation(&sim, args.json)?);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "simulation rejected");
                eprintln!("{}", err.user_message());
                process::exit(1);
            }
        },
    }
}
