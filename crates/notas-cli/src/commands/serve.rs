//! Serve command - run the web lookup page.

use std::path::PathBuf;

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
    no_open: bool,
    strict: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config, data, strict)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    if !config.data.path.exists() {
        eprintln!(
            "{} Grade dataset not found at {}; searches will report it until the file appears.",
            "Warning:".yellow(),
            config.data.path.display()
        );
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let data_path = config.data.path.clone();
    let mode = config.search.mode;
    let state = AppState::new(config)?;

    let url = format!("http://{}:{}", browser_host(&host), port);
    println!();
    println!(
        "{} {}",
        "Starting grade lookup at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data:     {}", data_path.display());
    println!("  Matching: {}", mode);
    if verbose {
        println!("  Bind:     {}:{}", host, port);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))?;

    println!("{}", "Server stopped.".yellow());
    Ok(())
}

/// Wildcard binds are opened in the browser as localhost.
fn browser_host(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" => "localhost",
        other => other,
    }
}
