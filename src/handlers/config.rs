//! Configuration related handlers.

use super::{EXIT_FAILURE, HandlerResult};
use crate::config::HarvestConfig;
use crate::reporter::TerminalReporter;
use std::path::Path;

/// Handle --init-config.
pub fn handle_init_config(path: &Path) -> HandlerResult {
    match HarvestConfig::write_template(path) {
        Ok(written) => {
            println!("Created configuration file template at {}", written.display());
            HandlerResult::Success
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            HandlerResult::Error(EXIT_FAILURE)
        }
    }
}

/// Handle --list-categories, including categories from the config file.
pub fn handle_list_categories(config: &HarvestConfig) -> HandlerResult {
    let reporter = TerminalReporter::new(true);
    println!("{}", reporter.categories(&config.taxonomy()));
    HandlerResult::Success
}
