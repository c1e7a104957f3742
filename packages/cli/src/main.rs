mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{import, render, upload, validate, ImportArgs, RenderArgs, UploadArgs, ValidateArgs};

/// Email Builder CLI - headless template tooling
#[derive(Parser, Debug)]
#[command(name = "emailbuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a document JSON file to static email HTML
    Render(RenderArgs),

    /// Check a document configuration against the structural rules
    Validate(ValidateArgs),

    /// Import a template (configuration JSON or raw markup) and emit the
    /// normalized document JSON
    Import(ImportArgs),

    /// Upload a file to the document-storage service
    Upload(UploadArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render(args) => render(args),
        Command::Validate(args) => validate(args),
        Command::Import(args) => import(args),
        Command::Upload(args) => upload(args),
    };

    if let Err(error) = result {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
