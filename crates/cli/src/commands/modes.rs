//! Modes command handler.

use super::to_json;
use citelog_citations::Mode;
use citelog_core::AppResult;
use clap::Args;
use serde::Serialize;

/// List the available response modes
#[derive(Args, Debug)]
pub struct ModesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ModeInfo {
    mode: Mode,
    label: &'static str,
    description: &'static str,
    example: &'static str,
}

impl From<Mode> for ModeInfo {
    fn from(mode: Mode) -> Self {
        Self {
            mode,
            label: mode.label(),
            description: mode.description(),
            example: mode.example(),
        }
    }
}

impl ModesCommand {
    pub fn execute(&self) -> AppResult<()> {
        let modes: Vec<ModeInfo> = Mode::ALL.into_iter().map(ModeInfo::from).collect();

        if self.json {
            println!("{}", to_json(&modes, true)?);
            return Ok(());
        }

        for info in &modes {
            println!("{} ({})", info.label, info.mode);
            println!("  {}", info.description);
            println!("  例: {}", info.example);
        }

        Ok(())
    }
}
