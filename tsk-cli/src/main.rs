//! # tsk CLI
//!
//! Command-line interface for the tsk static site generator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tsk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "tsk.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site
    Build,

    /// Preprocess one document and print its metadata and body
    Preprocess {
        /// Markdown document
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the outline of a TOC file as JSON
    Toc {
        /// Outline document
        file: PathBuf,

        /// Directory holding generated pages (URLs are only set for pages found here)
        #[arg(long)]
        pages: Option<PathBuf>,
    },

    /// Print the slug of some text
    Slug {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays machine readable
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build => commands::build_site(&cli.config),
        Commands::Preprocess { file, json } => commands::preprocess_file(&cli.config, &file, json),
        Commands::Toc { file, pages } => commands::print_toc(&file, pages.as_deref()),
        Commands::Slug { text } => {
            commands::print_slug(&text);
            Ok(())
        }
    }
}
