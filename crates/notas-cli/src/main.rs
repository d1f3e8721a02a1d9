//! Notas CLI - student grade lookup.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config;
    let result = match cli.command {
        Commands::Serve {
            data,
            port,
            host,
            no_open,
            strict,
        } => commands::serve::run(config, data, port, host, no_open, strict, cli.verbose),

        Commands::Lookup {
            query,
            data,
            name,
            strict,
            json,
        } => commands::lookup::run(config, data, query, name, strict, json),

        Commands::Export {
            query,
            data,
            name,
            output,
            strict,
        } => commands::export::run(config, data, query, name, output, strict),

        Commands::Status { data, json } => commands::status::run(config, data, json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("NOTAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A second init (tests, embedding) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
