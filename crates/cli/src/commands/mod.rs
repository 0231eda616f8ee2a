//! Command handlers for the citelog CLI.

pub mod assemble;
pub mod modes;
pub mod session;

pub use assemble::AssembleCommand;
pub use modes::ModesCommand;
pub use session::SessionCommand;

use citelog_citations::Mode;
use citelog_core::{config::AppConfig, AppResult};
use serde::Serialize;

/// Resolve the configured default mode.
fn configured_mode(config: &AppConfig) -> AppResult<Mode> {
    config.mode.parse()
}

/// Render a value as JSON for stdout.
fn to_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
