//! # infection-kernel
//!
//! Transitive "infection" over coaching graphs.
//!
//! Users coach other users. Coaching is treated as an undirected relation, so
//! the graph falls apart into groups of transitively connected users. The
//! kernel answers:
//!
//! > If this user is infected (moved to a new version), who else must be?
//!
//! ## Core Contract
//!
//! 1. Build a disjoint-set partition of users from a coach→student edge list
//! 2. Infect whole groups: every member moves to the identifier's version + 1
//! 3. Pick whole groups whose combined size best fits a limit (subset-sum DP)
//!
//! ## Architecture
//!
//! ```text
//! edge list → EdgeListReader → PartitionBuilder → Partition → queries
//!                                                    ↓
//!                                   VertexStore + Group arena + registry
//!                                                    ↓
//!                                   GroupSelector / PartitionSnapshot
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Members iterate in ascending user id
//! - Groups are listed by (size, identifier id), ascending
//! - Same input + same infections → identical snapshot fingerprint

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod parser;
pub mod partition;
pub mod builder;
pub mod selector;
pub mod canonical;
pub mod snapshot;
pub mod shared;
pub mod generator;
pub mod config;
pub mod logging;
pub mod shell;

// Re-exports
pub use types::{CoachingRecord, Group, GroupId, Vertex, VertexId, INITIAL_VERSION};
pub use store::{VertexError, VertexStore};
pub use parser::{CommentPolicy, EdgeListReader, FormatError, ParseOptions};
pub use partition::{BuildSummary, Infection, Partition};
pub use builder::PartitionBuilder;
pub use selector::{GroupSelector, SelectedGroup, Selection};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use snapshot::{GroupSummary, PartitionSnapshot};
pub use shared::SharedPartition;
pub use generator::{generate, GeneratedGraph, GeneratorError, GraphSpec};
pub use config::ShellConfig;
pub use shell::{Command, CommandError, Reply, Session};

/// Schema version for snapshot types.
/// Increment on breaking changes to any serialized type.
pub const PARTITION_SCHEMA_VERSION: &str = "1.0.0";
