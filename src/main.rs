use std::process::ExitCode;

use clap::Parser;
use model2code::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    match cli.run() {
        Ok(()) => {
            println!("Translation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
