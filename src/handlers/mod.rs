//! CLI command handlers.
//!
//! Kept apart from main.rs so they can be unit tested.

mod config;
mod harvest;

use std::process::ExitCode;

pub use config::{handle_init_config, handle_list_categories};
pub use harvest::{build_config, handle_harvest};

/// Exit code for any fatal harvesting error.
pub const EXIT_FAILURE: u8 = 2;

/// Result type for handler functions that can be tested.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    Success,
    Error(u8),
}

impl From<HandlerResult> for ExitCode {
    fn from(result: HandlerResult) -> Self {
        match result {
            HandlerResult::Success => ExitCode::SUCCESS,
            HandlerResult::Error(code) => ExitCode::from(code),
        }
    }
}
