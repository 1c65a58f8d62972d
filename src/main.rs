use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use monitoring_mixins::cli::{Cli, Display};
use monitoring_mixins::config::GeneratorConfig;
use monitoring_mixins::error::Result;
use monitoring_mixins::mixins;
use monitoring_mixins::output::ArtifactWriter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("monitoring_mixins=debug")
    } else {
        EnvFilter::new("monitoring_mixins=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let display = Display::new();

    if let Some(path) = &cli.config {
        display.print_info(&format!("Using configuration {}", path.display()));
    }
    let config = GeneratorConfig::load(cli.config.as_deref(), cli.overrides())?;
    if cli.verbose {
        display.print_config(&config);
    }

    let mut dashboards = ArtifactWriter::new("dashboards", config.dashboards.clone());
    let mut rules = ArtifactWriter::new("rules", config.rules.clone());
    mixins::register_all(&config, &mut dashboards, &mut rules)?;

    let written = dashboards.write()?;
    display.print_written("dashboard", "dashboards", &config.dashboards.dir, &written);

    let written = rules.write()?;
    display.print_written("rule", "rules", &config.rules.dir, &written);

    Ok(())
}
