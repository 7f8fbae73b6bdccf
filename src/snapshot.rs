//! Partition snapshots.
//!
//! A [`PartitionSnapshot`] captures every live group (identifier, size,
//! version, members) in registry order, plus a fingerprint over that data.
//! Two partitions built from the same input and infected the same way share a
//! fingerprint; any merge or infection that differs changes it.

use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_hash_hex, to_canonical_bytes};
use crate::partition::Partition;
use crate::store::VertexError;
use crate::types::VertexId;
use crate::PARTITION_SCHEMA_VERSION;

/// One group as seen by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group identifier.
    pub identifier: VertexId,
    /// Member count.
    pub size: usize,
    /// Identifier's version.
    pub version: u32,
    /// Members, ascending.
    pub members: Vec<VertexId>,
}

/// Serializable, fingerprinted view of a partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSnapshot {
    /// xxh64 over schema version, vertex count and groups.
    pub snapshot_id: String,
    /// Schema version used for types.
    pub schema_version: String,
    /// Declared vertex count.
    pub vertex_count: u32,
    /// Live groups.
    pub group_count: usize,
    /// Groups in registry order.
    pub groups: Vec<GroupSummary>,
}

/// Internal struct for computing snapshot_id.
#[derive(Serialize)]
struct SnapshotIdInput<'a> {
    schema_version: &'a str,
    vertex_count: u32,
    groups: &'a [GroupSummary],
}

impl PartitionSnapshot {
    /// Capture the current state of `partition`.
    pub fn capture(partition: &Partition) -> Result<Self, VertexError> {
        let groups = partition
            .groups()
            .map(|group| {
                Ok(GroupSummary {
                    identifier: group.identifier(),
                    size: group.size(),
                    version: group.version(partition.vertices())?,
                    members: group.members().collect(),
                })
            })
            .collect::<Result<Vec<_>, VertexError>>()?;

        let snapshot_id = canonical_hash_hex(&SnapshotIdInput {
            schema_version: PARTITION_SCHEMA_VERSION,
            vertex_count: partition.vertex_count(),
            groups: &groups,
        });

        Ok(Self {
            snapshot_id,
            schema_version: PARTITION_SCHEMA_VERSION.to_string(),
            vertex_count: partition.vertex_count(),
            group_count: groups.len(),
            groups,
        })
    }

    /// Serialize to canonical JSON bytes.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        to_canonical_bytes(self)
    }

    /// Pretty JSON for display.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether `partition` still matches this snapshot.
    pub fn verify(&self, partition: &Partition) -> bool {
        Self::capture(partition)
            .map(|current| current.snapshot_id == self.snapshot_id)
            .unwrap_or(false)
    }
}
