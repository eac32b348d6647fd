//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::Result;

/// Generate static completions for the given shell on stdout
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "traq", &mut std::io::stdout());
    Ok(())
}
