use clap::Parser;
use eyre::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use todostore::{Config, Outcome, Session, TodoStore, render};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore - In-memory to-do list session with status tabs and due dates")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/todostore/todostore.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit one JSON snapshot per event instead of text
    #[arg(long)]
    json: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = Config::locate(cli.config.as_deref())?;
    let config = Config::load(config_path.as_deref())?;

    // Setup tracing; the filter depends on the config, so this runs right after loading it
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &config_path {
        Some(path) => info!(path = %path.display(), "Loaded config"),
        None => debug!("No config file found, using defaults"),
    }

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(TodoStore::with_filter(config.filter()));
    info!(tab = %config.default_tab, sort = %config.default_sort, "Session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run(&mut session, stdin.lock(), &mut stdout, cli.json)?;

    info!(items = session.store().len(), "Session ended");
    Ok(())
}

/// Apply input lines until end of input or `quit`, rendering after each event
///
/// Lines that are not valid UTF-8 or do not parse are reported and skipped.
fn run(session: &mut Session, mut input: impl BufRead, out: &mut impl Write, json: bool) -> Result<()> {
    let mut buf = Vec::new();

    print_snapshot(out, session, json)?;

    loop {
        buf.clear();
        let read = input.read_until(b'\n', &mut buf).context("Failed to read input")?;
        if read == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(e) => {
                debug!(error = %e, "Skipping input that is not valid UTF-8");
                eprintln!("Error: input line is not valid UTF-8");
                continue;
            }
        };

        match session.handle_line(line) {
            Ok(Outcome::Render) => print_snapshot(out, session, json)?,
            Ok(Outcome::Help) => writeln!(out, "{}", render::HELP)?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                debug!(line, error = %e, "Ignoring unparseable input");
                eprintln!("Error: {:#}", e);
            }
        }
    }

    Ok(())
}

fn print_snapshot(out: &mut impl Write, session: &Session, json: bool) -> Result<()> {
    let snapshot = session.snapshot();
    if json {
        let line = serde_json::to_string(&snapshot).context("Failed to serialize snapshot")?;
        writeln!(out, "{}", line)?;
    } else {
        write!(out, "{}", render::render(&snapshot))?;
    }
    out.flush()?;
    Ok(())
}
