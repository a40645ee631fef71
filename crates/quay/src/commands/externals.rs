//! `quay externals` command implementation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use quay_externals::process_nav_tree;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the externals command.
#[derive(Args)]
pub(crate) struct ExternalsArgs {
    /// Navigation tree YAML file to process.
    nav_file: PathBuf,

    /// Project root the external/ checkouts and pages/ content hang off.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Build mode: abort on missing external sources instead of degrading
    /// to a placeholder entry.
    #[arg(long)]
    build: bool,

    /// Write the updated navigation tree here (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (show mount resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExternalsArgs {
    /// Execute the externals command.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation file cannot be read or parsed, or
    /// if any mount fails to resolve fatally.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        output.info(&format!("Navigation: {}", self.nav_file.display()));
        output.info(&format!("Project root: {}", self.root.display()));
        if self.build {
            output.info("Mode: build (missing external sources are fatal)");
        } else {
            output.info("Mode: preview (missing external sources degrade)");
        }

        let raw = fs::read_to_string(&self.nav_file)?;
        let mut nav: serde_yaml::Value = serde_yaml::from_str(&raw)?;

        process_nav_tree(&self.root, &mut nav, self.build)?;

        let rendered = serde_yaml::to_string(&nav)?;
        match &self.output {
            Some(path) => {
                fs::write(path, &rendered)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                std::io::stdout().lock().write_all(rendered.as_bytes())?;
            }
        }
        Ok(())
    }
}
