use clap::Parser;
use repoharvester::{
    Cli,
    handlers::{EXIT_FAILURE, build_config, handle_harvest, handle_init_config, handle_list_categories},
    logging,
};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log.as_deref()) {
        eprintln!("Error: could not open log file: {}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    // Handle config initialization
    if let Some(ref path) = cli.init_config {
        return handle_init_config(path).into();
    }

    let config = match build_config(&cli, Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if cli.list_categories {
        return handle_list_categories(&config).into();
    }

    match cli.source.as_deref() {
        Some(source) => handle_harvest(&cli, config, source).into(),
        None => ExitCode::from(EXIT_FAILURE),
    }
}
