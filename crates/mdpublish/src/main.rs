//! mdpublish — turn markdown chapter files into HTML and ebooks.
//!
//! Reads a project file (`.publish.yml` by default), builds the book it
//! describes and runs every configured output in order.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use publish_core::output::Output;

mod project;

#[derive(Parser)]
#[command(
    name = "mdpublish",
    version,
    about = "Publish markdown chapters as HTML or ebooks"
)]
struct Cli {
    /// Project file (YAML, or JSON for a .json extension)
    #[arg(default_value = ".publish.yml")]
    project: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let project = project::load_project_file(&cli.project)
        .with_context(|| format!("Failed to load project {}", cli.project.display()))?;

    log::info!(
        "Publishing '{}': {} chapters, {} outputs",
        project.book.title,
        project.book.chapters().len(),
        project.outputs.len()
    );

    for output in &project.outputs {
        output
            .make(&project.book, &project.substitutions)
            .with_context(|| format!("Failed to make {}", output.path().display()))?;
    }

    Ok(())
}
