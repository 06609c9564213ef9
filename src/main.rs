//! clanalyze - Main Entry Point
//!
//! Parses one C or C++ source and prints its class definitions as JSON.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clanalyze::{CursorDumper, DefinitionCollector, ParseInput, Parser, ParserConfig};

#[derive(ClapParser, Debug)]
#[command(name = "clanalyze", version, about = "Report class definitions in C and C++ sources")]
struct Args {
    /// Source file to parse
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    file: Option<PathBuf>,

    /// Read the source from standard input
    #[arg(long)]
    stdin: bool,

    /// Dump every top-level cursor to stderr
    #[arg(long)]
    dump: bool,

    /// Print one JSON document per line
    #[arg(long)]
    compact: bool,

    /// Write logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Arguments for the front end, such as `-x c` or `-std=c++17`
    #[arg(last = true)]
    frontend_args: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "clanalyze=info".into()),
    );
    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    let config = ParserConfig::from_env();
    info!("Starting clanalyze v{}", env!("CARGO_PKG_VERSION"));

    let mut parser = Parser::with_config(config);

    let collector = Rc::new(RefCell::new(DefinitionCollector::new()));
    parser.add_observer(collector.clone())?;

    if args.dump {
        parser.add_observer(Rc::new(RefCell::new(CursorDumper::new(io::stderr()))))?;
    }

    let input = match args.file {
        Some(path) => ParseInput::from_path(path),
        None => ParseInput::from_reader(io::stdin()),
    }
    .with_args(args.frontend_args);

    parser.parse(input).context("parse failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for definition in collector.borrow().definitions() {
        if args.compact {
            serde_json::to_writer(&mut out, definition)?;
        } else {
            serde_json::to_writer_pretty(&mut out, definition)?;
        }
        writeln!(out)?;
    }

    info!(definitions = collector.borrow().len(), "Done");
    Ok(())
}
