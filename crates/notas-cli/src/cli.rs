//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Notas: student grade lookup
#[derive(Parser)]
#[command(name = "notas")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./notas.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web lookup page
    Serve {
        /// Grade spreadsheet (default: from configuration)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Port for web server
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Accept only well-formed identifiers (00-0000-00)
        #[arg(long)]
        strict: bool,
    },

    /// Look up a student's grades in the terminal
    Lookup {
        /// Student identifier or name
        #[arg(value_name = "QUERY")]
        query: String,

        /// Grade spreadsheet (default: from configuration)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Student name, when the identifier is shared
        #[arg(short, long)]
        name: Option<String>,

        /// Accept only well-formed identifiers (00-0000-00)
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a student's transcript as PDF
    Export {
        /// Student identifier or name
        #[arg(value_name = "QUERY")]
        query: String,

        /// Grade spreadsheet (default: from configuration)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Student name, when the identifier is shared
        #[arg(short, long)]
        name: Option<String>,

        /// Output path (default: ./Notas_<identifier>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Accept only well-formed identifiers (00-0000-00)
        #[arg(long)]
        strict: bool,
    },

    /// Show the loaded dataset and configuration
    Status {
        /// Grade spreadsheet (default: from configuration)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
