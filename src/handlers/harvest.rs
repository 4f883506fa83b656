//! The harvest handler.

use super::{EXIT_FAILURE, HandlerResult};
use crate::Cli;
use crate::config::HarvestConfig;
use crate::error::{HarvestError, Result};
use crate::pipeline::Harvester;
use crate::remote::{GitCloner, TOKEN_ENV_VAR};
use crate::reporter::TerminalReporter;
use crate::source::Source;
use std::path::Path;
use tracing::{debug, error};

/// Load the config file and overlay the command line on it.
pub fn build_config(cli: &Cli, working_dir: &Path) -> Result<HarvestConfig> {
    let base = HarvestConfig::load(cli.config.as_deref(), working_dir)?;
    let config = cli.apply(base);
    config.validate()?;
    debug!(?config, "Effective configuration");
    Ok(config)
}

/// Run a harvest for `source` and print the summary.
pub fn handle_harvest(cli: &Cli, config: HarvestConfig, source: &str) -> HandlerResult {
    let cloner = GitCloner::new()
        .with_auth_token(cli.token.clone())
        .with_ref(config.git_ref.clone());

    let harvester = match Harvester::new(config) {
        Ok(h) => h,
        Err(e) => return fail(&e),
    };

    let mut reporter = TerminalReporter::new(cli.ci);
    match harvester.run(&Source::parse(source), &cloner, &mut reporter) {
        Ok(summary) => {
            println!("{}", reporter.summary(&summary));
            HandlerResult::Success
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &HarvestError) -> HandlerResult {
    error!(stage = %e.stage(), "{}", e);
    eprintln!("Error: {}", e);
    if let Some(hint) = hint(e) {
        eprintln!("{}", hint);
    }
    HandlerResult::Error(EXIT_FAILURE)
}

/// Follow-up advice for errors the user can fix.
fn hint(e: &HarvestError) -> Option<String> {
    match e {
        HarvestError::Acquisition(remote) if remote.is_auth_error() => Some(format!(
            "Hint: pass --token or set {} for HTTPS clones, or load your SSH key into an agent",
            TOKEN_ENV_VAR
        )),
        _ => None,
    }
}
