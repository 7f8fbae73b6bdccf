//! Partition construction from an edge-list stream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::parser::{EdgeListReader, FormatError, ParseOptions};
use crate::partition::Partition;

/// Builds [`Partition`]s from edge lists.
///
/// A failed build returns an error and produces nothing; a partition the
/// caller already holds is never touched.
#[derive(Debug, Clone, Default)]
pub struct PartitionBuilder {
    options: ParseOptions,
}

impl PartitionBuilder {
    /// Create a builder with default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Build from any buffered reader.
    pub fn build<R: BufRead>(&self, reader: R) -> Result<Partition, FormatError> {
        let records = EdgeListReader::new(reader, self.options)?;
        let mut partition = Partition::new(records.declared());
        let mut applied = 0usize;
        for record in records {
            partition.add_record(&record?)?;
            applied += 1;
        }

        info!(
            records = applied,
            vertices = partition.vertex_count(),
            groups = partition.group_count(),
            "partition built"
        );
        Ok(partition)
    }

    /// Build from an in-memory edge list.
    pub fn build_str(&self, input: &str) -> Result<Partition, FormatError> {
        self.build(input.as_bytes())
    }

    /// Build from a file.
    pub fn build_path(&self, path: impl AsRef<Path>) -> Result<Partition, FormatError> {
        let file = File::open(path.as_ref())?;
        self.build(BufReader::new(file))
    }
}
