//! # pce
//!
//! Command-line front end for the persistent context engine. Records
//! interactions typed on stdin and prints reconstructed context.

#![deny(unsafe_code)]

mod input;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pce_core::ContextBundle;
use pce_memory::ContextEngine;
use pce_settings::PceSettings;

/// Persistent context engine.
#[derive(Parser, Debug)]
#[command(name = "pce", about = "Persistent context engine", version)]
struct Cli {
    /// Settings file (defaults to `~/.pce/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Frame log to use instead of the configured one.
    #[arg(long, global = true)]
    memory_file: Option<PathBuf>,

    /// Print JSON instead of the text report.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enter a new interaction.
    Save,
    /// Print the reconstructed context bundle.
    Load,
    /// Search memory for relevant context.
    Search {
        /// Keywords to match.
        keywords: Vec<String>,
    },
    /// Print context reconstructed from a longer stretch of history.
    Summarize,
}

impl Cli {
    fn load_settings(&self) -> Result<PceSettings> {
        let path = self
            .settings
            .clone()
            .unwrap_or_else(pce_settings::settings_path);
        let mut settings = pce_settings::load_settings_from_path(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        if let Some(ref memory_file) = self.memory_file {
            settings.store.path.clone_from(memory_file);
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let settings = args.load_settings()?;
    pce_core::logging::init_subscriber(&settings.logging.level);
    tracing::debug!(store = %settings.store.path.display(), "settings loaded");

    let engine = ContextEngine::from_settings(&settings);
    match args.command {
        Command::Save => save(&engine, args.json),
        Command::Load => {
            let bundle = engine.load("").context("Failed to load context")?;
            print_bundle(&bundle, args.json)
        }
        Command::Search { keywords } => {
            let query = keywords.join(" ");
            if query.trim().is_empty() {
                println!("Provide a keyword to search.");
                return Ok(());
            }
            let bundle = engine.load(&query).context("Failed to search context")?;
            print_bundle(&bundle, args.json)
        }
        Command::Summarize => {
            let bundle = engine.summarize().context("Failed to summarize context")?;
            print_bundle(&bundle, args.json)
        }
    }
}

fn prompt(label: &str) -> Result<()> {
    let mut stderr = io::stderr();
    writeln!(
        stderr,
        "Enter {label} (finish with a single '{}' on its own line):",
        input::BLOCK_TERMINATOR
    )?;
    stderr.flush()?;
    Ok(())
}

fn save(engine: &ContextEngine, json: bool) -> Result<()> {
    let mut stdin = io::stdin().lock();

    prompt("user message")?;
    let user = input::read_block(&mut stdin).context("Failed to read user message")?;
    if user.is_empty() {
        println!("No user message entered.");
        return Ok(());
    }

    prompt("assistant message")?;
    let assistant = input::read_block(&mut stdin).context("Failed to read assistant message")?;
    if assistant.is_empty() {
        println!("No assistant message entered.");
        return Ok(());
    }

    let frame = engine
        .save(&user, &assistant)
        .context("Failed to save interaction")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        let stored = engine.store().len().context("Failed to count stored frames")?;
        print!("{}", report::render_saved(&frame, stored));
    }
    Ok(())
}

fn print_bundle(bundle: &ContextBundle, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(bundle)?);
    } else {
        print!("{}", report::render_bundle(bundle));
    }
    Ok(())
}
