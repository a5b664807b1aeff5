//! semdoc - enhance and query semantic documents.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use semdoc::cli::{self, Cli, Commands};
use semdoc::config::SemdocConfig;
use semdoc::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SemdocConfig::load(&cli)?;

    match &cli.command {
        Commands::Enhance { input, output, .. } => {
            cli::enhance::run_enhance(input, output.as_deref(), &config)
        }
        Commands::Query {
            input,
            target,
            value,
            ..
        } => cli::query::run_query(input, *target, value.as_deref(), &config),
        Commands::Navigate { input, bid, .. } => cli::navigate::run_navigate(input, bid, &config),
    }
}
