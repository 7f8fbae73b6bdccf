//! Random coaching graph generation.
//!
//! Produces edge lists for exercising the kernel: `edges` distinct directed
//! coach→student edges drawn uniformly at random over `vertices` users, with
//! no self edges and at most `max_out_degree` students per coach.

use std::collections::BTreeSet;
use std::io::{self, Write};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::CoachingRecord;

/// Error type for graph generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A graph needs at least one user.
    #[error("a graph needs at least one user")]
    NoVertices,
    /// More edges requested than the degree bound allows.
    #[error("cannot place {edges} edges: at most {capacity} fit under the degree bound")]
    TooManyEdges {
        /// Requested edges.
        edges: usize,
        /// Largest satisfiable edge count.
        capacity: usize,
    },
    /// Writing the graph failed.
    #[error("write error: {0}")]
    Io(#[from] io::Error),
}

/// Shape of a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Number of users.
    pub vertices: u32,
    /// Number of distinct coaching edges.
    pub edges: usize,
    /// Most students any one coach may have.
    pub max_out_degree: usize,
}

impl GraphSpec {
    /// Create a new spec.
    pub fn new(vertices: u32, edges: usize, max_out_degree: usize) -> Self {
        Self {
            vertices,
            edges,
            max_out_degree,
        }
    }

    /// Largest edge count this spec can hold.
    pub fn capacity(&self) -> usize {
        let n = self.vertices as usize;
        n * self.max_out_degree.min(n.saturating_sub(1))
    }
}

/// A generated graph: sorted students per coach, coaches `1..=vertices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGraph {
    students: Vec<BTreeSet<u32>>,
}

impl GeneratedGraph {
    /// Number of users.
    pub fn vertices(&self) -> u32 {
        self.students.len() as u32
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.students.iter().map(BTreeSet::len).sum()
    }

    /// One record per user, in id order.
    pub fn records(&self) -> Vec<CoachingRecord> {
        self.students
            .iter()
            .enumerate()
            .map(|(i, s)| CoachingRecord::new(i as u32 + 1, s.iter().copied().collect()))
            .collect()
    }

    /// Write in edge-list format: header, then `coach s1,s2,...` per user.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.vertices())?;
        for record in self.records() {
            write!(out, "{}", record.coach)?;
            for (i, student) in record.students.iter().enumerate() {
                let sep = if i == 0 { ' ' } else { ',' };
                write!(out, "{sep}{student}")?;
            }
            writeln!(out)?;
        }
        out.flush()
    }

    /// Render the edge list to a string.
    pub fn to_edge_list(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Generate a random graph for `spec`.
pub fn generate<R: Rng + ?Sized>(
    spec: &GraphSpec,
    rng: &mut R,
) -> Result<GeneratedGraph, GeneratorError> {
    if spec.vertices == 0 {
        return Err(GeneratorError::NoVertices);
    }
    let capacity = spec.capacity();
    if spec.edges > capacity {
        return Err(GeneratorError::TooManyEdges {
            edges: spec.edges,
            capacity,
        });
    }

    let n = spec.vertices;
    let mut students = vec![BTreeSet::new(); n as usize];
    let mut placed = 0;
    while placed < spec.edges {
        let from = rng.gen_range(1..=n);
        let to = rng.gen_range(1..=n);
        if from == to {
            continue;
        }
        let out = &mut students[from as usize - 1];
        if out.len() >= spec.max_out_degree {
            continue;
        }
        if out.insert(to) {
            placed += 1;
        }
    }

    Ok(GeneratedGraph { students })
}
