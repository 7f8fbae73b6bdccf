//! Random coaching graph generator.
//!
//! Writes an edge list with `VERTICES` users and `EDGES` distinct coaching
//! edges, each coach having at most `MAX_DEGREE` students.
//!
//! ```bash
//! cargo run --bin gen_graph -- 1000 2500 4 --seed 7 --output graph.conf
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use infection_kernel::logging::init_tracing;
use infection_kernel::{generate, GraphSpec};

/// Generate a random coaching graph
#[derive(Parser, Debug)]
#[command(name = "gen_graph", version, about, long_about = None)]
struct Args {
    /// Number of users
    vertices: u32,

    /// Number of coaching edges
    edges: usize,

    /// Maximum students per coach
    max_degree: usize,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("infection_kernel=info");
    let args = Args::parse();

    let spec = GraphSpec::new(args.vertices, args.edges, args.max_degree);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = generate(&spec, &mut rng)?;

    match &args.output {
        Some(path) => graph.write_to(BufWriter::new(File::create(path)?))?,
        None => graph.write_to(BufWriter::new(io::stdout().lock()))?,
    }

    info!(
        vertices = graph.vertices(),
        edges = graph.edge_count(),
        seed = ?args.seed,
        "graph written"
    );
    Ok(())
}
