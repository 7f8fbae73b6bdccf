//! Infection Shell Binary
//!
//! Interactive testbed over a coaching graph.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `INFECTION_GRAPH`: edge-list file used by `setup` (default: graph.conf)
//! - `INFECTION_COMMENTS`: `terminate` or `skip` (default: terminate)
//! - `RUST_LOG`: Log level filter (default: infection_kernel=warn)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" otherwise (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin infection_shell -- --graph graph.conf --setup
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use infection_kernel::logging::init_tracing;
use infection_kernel::shell::HELP;
use infection_kernel::{CommentPolicy, Reply, Session, ShellConfig};

/// Interactive infection testbed
#[derive(Parser, Debug)]
#[command(name = "infection_shell", version, about, long_about = None)]
struct Args {
    /// Edge-list file read by `setup`
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Comment line handling: terminate or skip
    #[arg(long, value_parser = parse_policy)]
    comments: Option<CommentPolicy>,

    /// Run `setup` before the first prompt
    #[arg(long)]
    setup: bool,
}

fn parse_policy(s: &str) -> Result<CommentPolicy, String> {
    CommentPolicy::from_str(s).ok_or_else(|| format!("expected terminate or skip, got {s:?}"))
}

fn prompt(out: &mut impl Write, config: &ShellConfig) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", config.prompt)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("infection_kernel=warn");
    let args = Args::parse();

    let mut config = ShellConfig::from_env();
    if let Some(graph) = args.graph {
        config.graph_path = graph;
    }
    if let Some(policy) = args.comments {
        config.parse.on_comment = policy;
    }
    info!(graph = %config.graph_path.display(), comments = %config.parse.on_comment, "starting shell");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "Welcome to the Graph Infection Testbed! I am a rudimentary shell. Following commands are available:"
    )?;
    writeln!(out, "{HELP}")?;

    let mut session = Session::new(config);
    if args.setup {
        if let Reply::Text(text) = session.handle_line("setup") {
            writeln!(out, "{text}")?;
        }
    }
    prompt(&mut out, session.config())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(&mut out, session.config())?;
            continue;
        }
        match session.handle_line(&line) {
            Reply::Text(text) => writeln!(out, "{text}")?,
            Reply::Clear => write!(out, "\x1B[2J\x1B[H")?,
            Reply::Quit => return Ok(()),
        }
        prompt(&mut out, session.config())?;
    }

    Ok(())
}
