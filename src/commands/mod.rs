mod config_cmd;
mod doses;
mod log;
mod plant;

pub use config_cmd::ConfigCommand;
pub use doses::DosesCommand;
pub use log::LogCommand;
pub use plant::PlantCommand;

use clap::ValueEnum;
use std::io::{self, Write};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Ask for confirmation unless `force` is set.
pub fn confirm(prompt: &str, force: bool) -> io::Result<bool> {
    if force {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
