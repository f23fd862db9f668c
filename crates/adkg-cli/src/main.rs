//! ADKG CLI - Alzheimer's disease knowledge graph pipeline.

use adkg_cli::commands;
use adkg_cli::config::OutputFormat;
use adkg_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Log to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // The configured formatter may not exist yet when an error surfaces
    let errors = Formatter::new(OutputFormat::Table, !cli.no_color);
    if let Err(e) = run(cli) {
        eprintln!("{}", errors.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> adkg_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::Load(args) => commands::execute_load(args, &config, &formatter),
        Command::Ask(args) => commands::execute_ask(args, &config, &formatter),
        Command::Stats(args) => commands::execute_stats(args, &config, &formatter),
    }
}
