use anyhow::{Context, Result};
use pipeframe::cli::output::*;
use pipeframe::cli::{
    commands::{RunCommand, ValidateCommand},
    Cli, Command,
};
use pipeframe::core::PipelineConfig;
use pipeframe::execution::{ExecutionError, ExecutionEvent, PipelineExecutor};
use pipeframe::filter::{discover, FilterRegistry};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    let result = match cli.command() {
        Command::Run(cmd) => run_pipeline(&cli, &cmd).await,
        Command::Validate(cmd) => validate_pipeline(&cli, &cmd),
        Command::Filters => load_filters(&cli).map(|_| ()),
    };

    if let Err(e) = result {
        println!("{} {}", CROSS, style(format!("{:#}", e)).red());
        std::process::exit(1);
    }

    Ok(())
}

/// Discover the filter programs and print their names
fn load_filters(cli: &Cli) -> Result<FilterRegistry> {
    let registry = discover(&cli.filters_dir).context("Filter discovery failed")?;
    println!("{}\n", format_filter_list(registry.names()));
    Ok(registry)
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    PipelineConfig::from_file(&cli.config).context("Invalid configuration")
}

async fn run_pipeline(cli: &Cli, cmd: &RunCommand) -> Result<()> {
    println!("{}\n", style("Starting pipeframe...").green());

    let registry = load_filters(cli)?;
    let config = load_config(cli)?;
    let entry = cmd
        .entry
        .clone()
        .unwrap_or_else(|| config.default_entry().to_string());

    let mut executor = PipelineExecutor::new(registry);

    // The failure itself is reported once, below, with its stage
    executor.add_event_handler(|event| {
        if !matches!(event, ExecutionEvent::PipelineFailed { .. }) {
            println!("{}", format_execution_event(&event));
        }
    });

    let report = executor
        .execute_from(&config, &entry)
        .await
        .context("Pipeline execution failed")?;

    if cmd.json {
        println!("\n{}", serde_json::to_string_pretty(&report)?);
    }

    println!(
        "\n{} Pipeline completed {} ({} steps, {:?})",
        CHECK,
        style("successfully").green(),
        report.steps.len(),
        report.duration()
    );

    Ok(())
}

fn validate_pipeline(cli: &Cli, cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let registry = load_filters(cli)?;
    let config = load_config(cli)?;

    for (filter, step_id) in config.filter_usages() {
        if !registry.contains(filter) {
            return Err(ExecutionError::FilterResolution {
                step_id: step_id.to_string(),
                filter: filter.to_string(),
            })
            .context("Invalid configuration");
        }
    }

    println!("{} Pipeline configuration is valid!", CHECK);
    println!("  Steps: {}", style(config.steps().len()).cyan());
    println!("  Entry: {}", style(config.default_entry()).bold());

    if cmd.json {
        let json = serde_json::to_string_pretty(&config)?;
        println!("\n{}", json);
    }

    Ok(())
}
