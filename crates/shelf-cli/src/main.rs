//! `shelf`: browse an asset catalog from the terminal.
//!
//! Run with: cargo run -p shelf-cli -- list assets.csv --tags "pixel, ui" --sort Name

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::{style, Term};
use shelf::{Engine, EngineConfig, Event};
use shelf_ingest::FileSource;
use tracing::debug;

mod cli;
mod logging;
mod render;

use crate::cli::{Cli, Command, Format, ListArgs, OutputMode, SourceArgs};
use crate::logging::{init_logging, LogConfig};
use crate::render::Renderer;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let colors = Term::stderr().features().colors_supported();
    let log_config = LogConfig::from_verbosity(cli.verbose).with_ansi(colors);
    init_logging(&log_config);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(&config)?;
    let renderer = Renderer::new(styled(cli.output))?;

    match &cli.command {
        Command::List(args) => {
            load(&mut engine, &args.source)?;
            for event in events(args) {
                engine.dispatch(event);
            }
            let projection = engine
                .projection()
                .context("catalog produced no projection")?;
            match args.format {
                Format::Text => println!("{}", renderer.page(projection, engine.indicator())?),
                Format::Json => println!("{}", serde_json::to_string_pretty(&projection.view())?),
            }
        }
        Command::Options(args) => {
            load(&mut engine, args)?;
            let options = engine
                .filter_options()
                .context("catalog produced no options")?;
            println!("{}", renderer.options(options)?);
        }
    }
    Ok(())
}

fn load(engine: &mut Engine, args: &SourceArgs) -> Result<()> {
    engine
        .load(&mut FileSource::new(&args.file))
        .with_context(|| format!("cannot open catalog {}", args.file.display()))?;
    if let Some(summary) = engine.summary() {
        debug!(?summary, "load summary");
    }
    Ok(())
}

fn styled(mode: OutputMode) -> bool {
    match mode {
        OutputMode::Auto => Term::stdout().features().colors_supported(),
        OutputMode::Term => true,
        OutputMode::Text => false,
    }
}

/// Translates flags into the events a user would produce, page last.
fn events(args: &ListArgs) -> Vec<Event> {
    let mut events = Vec::new();
    if let Some(category) = &args.category {
        events.push(Event::category(category.as_str()));
    }
    if let Some(license) = &args.license {
        events.push(Event::license(license.as_str()));
    }
    if let Some(name) = &args.name {
        events.push(Event::name(name.as_str()));
    }
    if let Some(tags) = &args.tags {
        events.push(Event::tags(tags.as_str()));
    }
    events.extend(args.sort.iter().map(|column| Event::sort_by(column.as_str())));
    events.push(Event::GoToPage(args.page));
    events
}
