use clap::Parser;
use gateway_lint::{cli::Cli, config, run_command};
use std::process;

fn main() {
    match run() {
        Ok(false) => {}
        Ok(true) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> gateway_lint::Result<bool> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;
    log::debug!("effective config: {:?}", config);

    run_command(cli.command, config)
}
