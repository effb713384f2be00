use clap::Parser;
use tracing_subscriber::EnvFilter;

use munkres_solver::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("munkres_solver=debug,info")
    } else {
        EnvFilter::new("munkres_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Solve(args) => {
            cli::solve::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Sample => {
            cli::sample::run(cli.format)?;
        }
    }

    Ok(())
}
