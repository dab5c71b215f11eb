//! CLI command definitions

use clap::Args;

/// Run the pipeline
#[derive(Debug, Args, Clone, Default)]
pub struct RunCommand {
    /// Step to start from (defaults to the config's entry, then step "1")
    #[arg(long)]
    pub entry: Option<String>,

    /// Print the run report as JSON after the result
    #[arg(long)]
    pub json: bool,
}

/// Validate the configuration
#[derive(Debug, Args, Clone, Default)]
pub struct ValidateCommand {
    /// Output the validated step graph in JSON format
    #[arg(long)]
    pub json: bool,
}
